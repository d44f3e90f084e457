//! Lambda recognition tests: introducers vs subscripts, capture
//! entries, specifiers in every order, trailing return types, and
//! nesting.

mod common;

use common::span_texts;
use cppscan_rs::{DiagnosticKind, SpanCategory, scan, tokenize};

// -----------------------------------------------------------
// Introducer position heuristic.
// -----------------------------------------------------------

#[test]
fn introducer_at_buffer_start() {
    assert_eq!(
        span_texts("[](int x) { return x; };", SpanCategory::LambdaIntroducer),
        ["[]"]
    );
}

#[test]
fn introducer_after_assignment() {
    assert_eq!(
        span_texts("auto f = [x]() {};", SpanCategory::LambdaIntroducer),
        ["[x]"]
    );
}

#[test]
fn introducer_after_call_paren_and_comma() {
    let input = "invoke([a]() {}, [b]() {});";
    assert_eq!(
        span_texts(input, SpanCategory::LambdaIntroducer),
        ["[a]", "[b]"]
    );
}

#[test]
fn introducer_after_return() {
    assert_eq!(
        span_texts("return [x]() { return x; };", SpanCategory::LambdaIntroducer),
        ["[x]"]
    );
}

#[test]
fn subscript_after_identifier_is_not_a_lambda() {
    let result = scan("sum += values[i];");
    assert!(result.spans.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn subscript_after_close_paren_is_not_a_lambda() {
    let result = scan("get_row(i)[j] = 0;");
    assert!(result.spans.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn chained_subscripts_are_not_lambdas() {
    let result = scan("m[i][j] = 0;");
    assert!(result.spans.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn statement_level_attribute_is_not_a_lambda() {
    let result = scan("[[noreturn]] void fail();");
    assert!(result.spans.is_empty());
    assert!(result.diagnostics.is_empty());
}

// -----------------------------------------------------------
// Capture lists.
// -----------------------------------------------------------

#[test]
fn empty_capture_list() {
    let input = "[](int x) { return x; };";
    assert!(span_texts(input, SpanCategory::Capture).is_empty());
    assert_eq!(span_texts(input, SpanCategory::CaptureList), [""]);
}

#[test]
fn capture_defaults_and_entries() {
    let input = "[=, lo, &hi]() { return lo + hi; };";
    assert_eq!(
        span_texts(input, SpanCategory::Capture),
        ["=", "lo", "&hi"]
    );
}

#[test]
fn capture_list_excludes_brackets() {
    let input = "[&, scale](int x) { use(x); };";
    assert_eq!(span_texts(input, SpanCategory::CaptureList), ["&, scale"]);
}

#[test]
fn init_capture_is_one_entry() {
    let input = "[n = compute(a, b)]() { return n; };";
    assert_eq!(
        span_texts(input, SpanCategory::Capture),
        ["n = compute(a, b)"]
    );
}

#[test]
fn capture_list_re_tokenizes_to_its_entries() {
    // The capture-list span's text, re-tokenized, reproduces the
    // capture entries in their original order.
    let input = "[&, value, this](int x) { use(x); };";
    let result = scan(input);
    let list = result
        .spans
        .iter()
        .find(|s| s.category == SpanCategory::CaptureList)
        .expect("capture list");

    let list_text = list.text(input);
    let rescanned: Vec<String> = tokenize(list_text)
        .tokens
        .iter()
        .filter(|t| t.kind.is_significant() && t.text(list_text) != ",")
        .map(|t| t.text(list_text).to_string())
        .collect();
    assert_eq!(rescanned, ["&", "value", "this"]);
    assert_eq!(
        span_texts(input, SpanCategory::Capture),
        ["&", "value", "this"]
    );
}

#[test]
fn pack_expansion_capture() {
    let input = "[args...]() { consume(args...); };";
    assert_eq!(span_texts(input, SpanCategory::Capture), ["args..."]);
}

// -----------------------------------------------------------
// Parameter lists and bodies.
// -----------------------------------------------------------

#[test]
fn lambda_without_parameter_list() {
    let input = "auto f = [this] { return this->n; };";
    assert!(span_texts(input, SpanCategory::ParameterList).is_empty());
    assert_eq!(
        span_texts(input, SpanCategory::LambdaBody),
        ["{ return this->n; }"]
    );
}

#[test]
fn immediately_invoked_lambda() {
    let input = "int n = [](int x) { return x * 2; } (21);";
    let result = scan(input);
    assert_eq!(
        span_texts(input, SpanCategory::LambdaBody),
        ["{ return x * 2; }"]
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn body_braces_nest() {
    let input = "[&]() { if (a) { f(); } else { g(); } };";
    assert_eq!(
        span_texts(input, SpanCategory::LambdaBody),
        ["{ if (a) { f(); } else { g(); } }"]
    );
}

// -----------------------------------------------------------
// Trailing return types.
// -----------------------------------------------------------

#[test]
fn trailing_return_simple() {
    let input = "[](int x) -> int { return x; };";
    assert_eq!(span_texts(input, SpanCategory::TrailingReturnType), ["-> int"]);
}

#[test]
fn trailing_return_pointer() {
    let input = "[this](int x) -> char * { return s; };";
    assert_eq!(
        span_texts(input, SpanCategory::TrailingReturnType),
        ["-> char *"]
    );
}

#[test]
fn trailing_return_array() {
    let input = "[s](int x) -> char [] { return s; };";
    assert_eq!(
        span_texts(input, SpanCategory::TrailingReturnType),
        ["-> char []"]
    );
}

#[test]
fn trailing_return_with_template_arguments() {
    let input = "[v]() -> std::vector<int> { return v; };";
    assert_eq!(
        span_texts(input, SpanCategory::TrailingReturnType),
        ["-> std::vector<int>"]
    );
}

// -----------------------------------------------------------
// Exception specifications and attributes, in either order.
// -----------------------------------------------------------

#[test]
fn throw_spec_then_trailing_return() {
    let input = "[this](int x) throw (int, double) -> void { run(); };";
    assert_eq!(
        span_texts(input, SpanCategory::ExceptionSpec),
        ["throw (int, double)"]
    );
    assert_eq!(
        span_texts(input, SpanCategory::TrailingReturnType),
        ["-> void"]
    );
}

#[test]
fn attribute_then_trailing_return() {
    let input = "[this](int x) [[noreturn]] -> void { run(); };";
    assert_eq!(
        span_texts(input, SpanCategory::Attribute),
        ["[[noreturn]]"]
    );
    assert_eq!(
        span_texts(input, SpanCategory::TrailingReturnType),
        ["-> void"]
    );
}

#[test]
fn throw_spec_then_attribute() {
    let input = "[this](int x) throw (int) [[noreturn]] -> void { run(); };";
    assert_eq!(span_texts(input, SpanCategory::ExceptionSpec), ["throw (int)"]);
    assert_eq!(span_texts(input, SpanCategory::Attribute), ["[[noreturn]]"]);
    assert_return_follows_specifiers(input);
}

#[test]
fn attribute_then_throw_spec() {
    let input = "[this](int x) [[noreturn]] throw (int) -> void { run(); };";
    assert_eq!(span_texts(input, SpanCategory::Attribute), ["[[noreturn]]"]);
    assert_eq!(span_texts(input, SpanCategory::ExceptionSpec), ["throw (int)"]);
    assert_return_follows_specifiers(input);
}

/// The trailing return type starts strictly after every exception
/// spec and attribute of the same lambda.
fn assert_return_follows_specifiers(input: &str) {
    let result = scan(input);
    let ret = result
        .spans
        .iter()
        .find(|s| s.category == SpanCategory::TrailingReturnType)
        .expect("trailing return type");
    for spec in result.spans.iter().filter(|s| {
        matches!(
            s.category,
            SpanCategory::ExceptionSpec | SpanCategory::Attribute
        )
    }) {
        assert!(spec.end <= ret.start, "{spec:?} overlaps {ret:?}");
    }
}

#[test]
fn noexcept_with_condition() {
    let input = "[](int x) noexcept(sizeof(x) > 2) { use(x); };";
    assert_eq!(
        span_texts(input, SpanCategory::ExceptionSpec),
        ["noexcept(sizeof(x) > 2)"]
    );
}

#[test]
fn bare_noexcept() {
    let input = "[](int x) noexcept { use(x); };";
    assert_eq!(span_texts(input, SpanCategory::ExceptionSpec), ["noexcept"]);
}

#[test]
fn mutable_specifier_is_skipped() {
    let input = "[n]() mutable -> int { return ++n; };";
    let result = scan(input);
    assert_eq!(
        span_texts(input, SpanCategory::TrailingReturnType),
        ["-> int"]
    );
    assert!(result.diagnostics.is_empty());
}

// -----------------------------------------------------------
// Nested lambdas.
// -----------------------------------------------------------

#[test]
fn nested_lambda_in_init_capture() {
    let input = "auto f = [&, total, bar = [&total]() -> int { return total; }(5)]() -> void { use(total, bar); };";
    let result = scan(input);

    let bodies: Vec<&str> = result
        .spans
        .iter()
        .filter(|s| s.category == SpanCategory::LambdaBody)
        .map(|s| s.text(input))
        .collect();
    assert_eq!(bodies, ["{ return total; }", "{ use(total, bar); }"]);

    // The whole inner lambda sits inside the outer `bar` capture
    // entry.
    let bar_entry = result
        .spans
        .iter()
        .find(|s| s.category == SpanCategory::Capture && s.text(input).starts_with("bar"))
        .expect("bar capture entry");
    let inner_intro = result
        .spans
        .iter()
        .filter(|s| s.category == SpanCategory::LambdaIntroducer)
        .find(|s| s.text(input) == "[&total]")
        .expect("inner introducer");
    assert!(bar_entry.contains(inner_intro));
    assert_eq!(bar_entry.text(input), "bar = [&total]() -> int { return total; }(5)");

    assert!(result.diagnostics.is_empty());
}

#[test]
fn nested_lambda_in_body() {
    let input = "[a]() { auto g = [b]() { return b; }; return g(); };";
    assert_eq!(
        span_texts(input, SpanCategory::LambdaIntroducer),
        ["[a]", "[b]"]
    );
    assert!(scan(input).diagnostics.is_empty());
}

#[test]
fn nested_lambda_in_default_argument() {
    let input = "[x](int n = [] { return 3; }()) { return x + n; };";
    assert_eq!(
        span_texts(input, SpanCategory::LambdaBody),
        ["{ return 3; }", "{ return x + n; }"]
    );
}

// -----------------------------------------------------------
// Recovery.
// -----------------------------------------------------------

#[test]
fn unterminated_capture_list_is_one_diagnostic() {
    let result = scan("auto f = [x");
    let kinds: Vec<&DiagnosticKind> = result.diagnostics.iter().map(|d| &d.kind).collect();
    assert_eq!(kinds, [&DiagnosticKind::UnterminatedLambda]);
}

#[test]
fn unterminated_body_extends_to_eof() {
    let input = "auto f = [x]() { use(x);";
    let result = scan(input);
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnterminatedLambda)
    );
    let body = result
        .spans
        .iter()
        .find(|s| s.category == SpanCategory::LambdaBody)
        .expect("partial body span");
    assert_eq!(body.end, input.len());
}

#[test]
fn mismatched_close_inside_body() {
    let result = scan("[x]() { f(]; };");
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| matches!(d.kind, DiagnosticKind::MismatchedBracket { .. }))
    );
}

#[test]
fn diagnostic_positions_are_one_based() {
    let result = scan("int a;\nauto f = [x");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].line, 2);
    assert_eq!(result.diagnostics[0].column, 10);
}
