//! Lambda-expression recognition.
//!
//! One [`LambdaContext`] tracks one candidate lambda from its `[`
//! introducer to the close of its body. Nested lambdas (inside
//! init-capture initializers, default arguments, or bodies) are an
//! explicit stack of contexts owned by the scanner, so nesting
//! depth stays bounded and inspectable instead of living on the
//! call stack.

use crate::brackets::BracketEffect;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::span::{Span, SpanCategory};
use crate::token::{Token, TokenKind};

/// State of a lambda under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LambdaState {
    /// Between `[` and its matching `]`.
    CaptureList,
    /// After `]`, before a parameter list, specifier, or body.
    AfterIntroducer,
    /// Inside the `(...)` parameter list.
    ParamList,
    /// Between the parameter list and the body: exception specs,
    /// attributes, `mutable` and friends, in any source order.
    Specifiers,
    /// After `->`, accumulating the trailing return type.
    TrailingReturn,
    /// Inside the `{...}` body.
    Body,
}

/// What the context did with an offered token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Token handled; move on.
    Consumed,
    /// Token observed but not claimed; the scanner may still start
    /// a nested lambda from it.
    Ignored,
    /// The lambda completed on this token (body closed).
    Done,
    /// The token cannot continue this lambda. Pop the context and
    /// offer the token to the enclosing one.
    DoneRedispatch,
}

/// One significant token as the scanner hands it to a context.
pub(crate) struct Offered<'t> {
    pub(crate) tok: &'t Token,
    pub(crate) idx: usize,
    /// How the token changed the bracket stack.
    pub(crate) effect: BracketEffect,
    /// Bracket depth after `effect` was applied.
    pub(crate) depth: usize,
    /// The next token is a `[` touching this one (the `[[` of an
    /// attribute block).
    pub(crate) adjacent_open: bool,
    /// The token lies inside a recognised template argument list,
    /// whose commas never separate capture entries.
    pub(crate) in_template_args: bool,
}

/// Whether a `[` at this position introduces a lambda rather than
/// an array subscript. Local heuristic on the preceding
/// significant token; not a full parse, and documented as such.
pub(crate) fn at_introducer_position(prev: Option<&Token>, source: &str) -> bool {
    prev.is_none_or(|t| match t.kind {
        TokenKind::Operator | TokenKind::Preprocessor => true,
        TokenKind::Punctuation => matches!(t.text(source), "(" | "{" | "," | ";"),
        TokenKind::Keyword => matches!(
            t.text(source),
            "return" | "co_return" | "co_yield" | "throw"
        ),
        _ => false,
    })
}

#[derive(Debug)]
pub(crate) struct LambdaContext {
    state: LambdaState,
    intro_idx: usize,
    intro_start: usize,
    intro_line: usize,
    intro_column: usize,
    /// Bracket depth with the introducer frame on the stack. The
    /// depth outside the lambda expression is one less.
    list_depth: usize,
    // Capture-list bookkeeping. An entry runs from its first
    // significant token to the last one before `,` or `]` at list
    // depth; init-capture initializers extend the entry through
    // whatever nesting they contain.
    entry_start: Option<usize>,
    entry_end: usize,
    params_open_idx: Option<usize>,
    params_start: usize,
    /// `throw`/`noexcept` keyword seen, parens not yet opened:
    /// (keyword start, keyword end).
    pending_spec: Option<(usize, usize)>,
    spec_open_idx: Option<usize>,
    spec_start: usize,
    attr_open_idx: Option<usize>,
    attr_start: usize,
    ret_start: usize,
    last_sig_end: usize,
    body_open_idx: Option<usize>,
    body_start: usize,
}

impl LambdaContext {
    /// Begin a context for the introducer `[` at token `idx`,
    /// whose frame has just been pushed (`depth` includes it).
    pub(crate) fn start(idx: usize, tok: &Token, depth: usize) -> Self {
        Self {
            state: LambdaState::CaptureList,
            intro_idx: idx,
            intro_start: tok.start,
            intro_line: tok.line,
            intro_column: tok.column,
            list_depth: depth,
            entry_start: None,
            entry_end: tok.end,
            params_open_idx: None,
            params_start: 0,
            pending_spec: None,
            spec_open_idx: None,
            spec_start: 0,
            attr_open_idx: None,
            attr_start: 0,
            ret_start: 0,
            last_sig_end: 0,
            body_open_idx: None,
            body_start: 0,
        }
    }

    /// Byte offset of the introducer, for nested-entry bookkeeping
    /// in the enclosing context.
    pub(crate) const fn intro_start(&self) -> usize {
        self.intro_start
    }

    /// Offer one significant token to this context.
    pub(crate) fn on_token(
        &mut self,
        source: &str,
        offered: &Offered<'_>,
        spans: &mut Vec<Span>,
    ) -> Step {
        match self.state {
            LambdaState::CaptureList => self.on_capture_list(source, offered, spans),
            LambdaState::AfterIntroducer => self.on_after_introducer(source, offered, spans),
            LambdaState::ParamList => self.on_param_list(offered, spans),
            LambdaState::Specifiers => self.on_specifier(source, offered, spans),
            LambdaState::TrailingReturn => self.on_trailing_return(source, offered, spans),
            LambdaState::Body => self.on_body(offered, spans),
        }
    }

    fn on_capture_list(
        &mut self,
        source: &str,
        offered: &Offered<'_>,
        spans: &mut Vec<Span>,
    ) -> Step {
        let tok = offered.tok;
        if matches!(offered.effect, BracketEffect::Close(frame) if frame.token_index == self.intro_idx)
        {
            self.finish_entry(spans);
            spans.push(Span::new(
                SpanCategory::CaptureList,
                self.intro_start + 1,
                tok.start,
            ));
            spans.push(Span::new(
                SpanCategory::LambdaIntroducer,
                self.intro_start,
                tok.end,
            ));
            self.state = LambdaState::AfterIntroducer;
            return Step::Consumed;
        }
        // Only a comma at list depth separates entries; inside an
        // init-capture initializer the depth is greater, and inside
        // a template argument list the comma separates arguments,
        // not captures.
        if offered.depth == self.list_depth
            && !offered.in_template_args
            && tok.kind == TokenKind::Punctuation
            && tok.text(source) == ","
        {
            self.finish_entry(spans);
            return Step::Consumed;
        }
        if self.entry_start.is_none() {
            self.entry_start = Some(tok.start);
        }
        self.entry_end = tok.end;
        Step::Ignored
    }

    fn finish_entry(&mut self, spans: &mut Vec<Span>) {
        if let Some(start) = self.entry_start.take() {
            spans.push(Span::new(SpanCategory::Capture, start, self.entry_end));
        }
    }

    fn on_after_introducer(
        &mut self,
        source: &str,
        offered: &Offered<'_>,
        spans: &mut Vec<Span>,
    ) -> Step {
        let tok = offered.tok;
        match (tok.kind, tok.text(source)) {
            (TokenKind::Punctuation, "(") => {
                self.state = LambdaState::ParamList;
                self.params_open_idx = Some(offered.idx);
                self.params_start = tok.start;
                Step::Consumed
            }
            (TokenKind::Punctuation, "{") => {
                self.enter_body(offered.idx, tok.start);
                Step::Consumed
            }
            (TokenKind::Operator, "->") => {
                self.enter_trailing_return(tok);
                Step::Consumed
            }
            (TokenKind::Keyword, "throw" | "noexcept" | "mutable" | "constexpr" | "consteval")
            | (TokenKind::Punctuation, "[") => {
                self.state = LambdaState::Specifiers;
                self.on_specifier(source, offered, spans)
            }
            _ => Step::DoneRedispatch,
        }
    }

    fn on_param_list(&mut self, offered: &Offered<'_>, spans: &mut Vec<Span>) -> Step {
        if matches!(offered.effect, BracketEffect::Close(frame) if Some(frame.token_index) == self.params_open_idx)
        {
            spans.push(Span::new(
                SpanCategory::ParameterList,
                self.params_start,
                offered.tok.end,
            ));
            self.state = LambdaState::Specifiers;
            return Step::Consumed;
        }
        // Default-argument expressions may hold anything,
        // including nested lambdas; leave those to the scanner.
        Step::Ignored
    }

    fn on_specifier(&mut self, source: &str, offered: &Offered<'_>, spans: &mut Vec<Span>) -> Step {
        let tok = offered.tok;
        // Inside an attribute block: consume until the frame of
        // the first `[` closes.
        if let Some(open_idx) = self.attr_open_idx {
            if matches!(offered.effect, BracketEffect::Close(frame) if frame.token_index == open_idx)
            {
                spans.push(Span::new(SpanCategory::Attribute, self.attr_start, tok.end));
                self.attr_open_idx = None;
            }
            return Step::Consumed;
        }
        // `throw`/`noexcept` seen; its parenthesised list either
        // starts here or the spec was the bare keyword.
        if let Some((start, kw_end)) = self.pending_spec {
            if tok.kind == TokenKind::Punctuation && tok.text(source) == "(" {
                self.pending_spec = None;
                self.spec_open_idx = Some(offered.idx);
                self.spec_start = start;
                return Step::Consumed;
            }
            spans.push(Span::new(SpanCategory::ExceptionSpec, start, kw_end));
            self.pending_spec = None;
            // fall through: the current token still needs a home
        }
        if let Some(open_idx) = self.spec_open_idx {
            if matches!(offered.effect, BracketEffect::Close(frame) if frame.token_index == open_idx)
            {
                spans.push(Span::new(
                    SpanCategory::ExceptionSpec,
                    self.spec_start,
                    tok.end,
                ));
                self.spec_open_idx = None;
            }
            return Step::Consumed;
        }

        match (tok.kind, tok.text(source)) {
            (TokenKind::Keyword, "throw" | "noexcept") => {
                self.pending_spec = Some((tok.start, tok.end));
                Step::Consumed
            }
            (TokenKind::Keyword, "mutable" | "constexpr" | "consteval" | "static") => {
                Step::Consumed
            }
            (TokenKind::Punctuation, "[") if offered.adjacent_open => {
                self.attr_open_idx = Some(offered.idx);
                self.attr_start = tok.start;
                Step::Consumed
            }
            (TokenKind::Operator, "->") => {
                self.enter_trailing_return(tok);
                Step::Consumed
            }
            (TokenKind::Punctuation, "{") => {
                self.enter_body(offered.idx, tok.start);
                Step::Consumed
            }
            _ => Step::DoneRedispatch,
        }
    }

    fn on_trailing_return(
        &mut self,
        source: &str,
        offered: &Offered<'_>,
        spans: &mut Vec<Span>,
    ) -> Step {
        let tok = offered.tok;
        // The body brace is the first `{` opened directly at the
        // lambda's own depth; brackets nested in the return type
        // (`char []`, function-pointer parens, template argument
        // lists) pass through.
        if offered.effect == BracketEffect::Open
            && offered.depth == self.list_depth
            && tok.kind == TokenKind::Punctuation
            && tok.text(source) == "{"
        {
            spans.push(Span::new(
                SpanCategory::TrailingReturnType,
                self.ret_start,
                self.last_sig_end,
            ));
            self.enter_body(offered.idx, tok.start);
            return Step::Consumed;
        }
        self.last_sig_end = tok.end;
        Step::Consumed
    }

    fn on_body(&mut self, offered: &Offered<'_>, spans: &mut Vec<Span>) -> Step {
        if matches!(offered.effect, BracketEffect::Close(frame) if Some(frame.token_index) == self.body_open_idx)
        {
            spans.push(Span::new(
                SpanCategory::LambdaBody,
                self.body_start,
                offered.tok.end,
            ));
            return Step::Done;
        }
        // Body contents are not interpreted, except that the
        // scanner may start nested lambdas from here.
        Step::Ignored
    }

    fn enter_trailing_return(&mut self, tok: &Token) {
        self.state = LambdaState::TrailingReturn;
        self.ret_start = tok.start;
        self.last_sig_end = tok.end;
    }

    fn enter_body(&mut self, idx: usize, start: usize) {
        self.state = LambdaState::Body;
        self.body_open_idx = Some(idx);
        self.body_start = start;
    }

    /// A nested lambda completed inside this one; extend whatever
    /// region it was embedded in.
    pub(crate) fn note_nested(&mut self, start: usize, end: usize) {
        match self.state {
            LambdaState::CaptureList => {
                if self.entry_start.is_none() {
                    self.entry_start = Some(start);
                }
                self.entry_end = end;
            }
            LambdaState::TrailingReturn => self.last_sig_end = end,
            _ => {}
        }
    }

    /// Token indices of bracket frames this lambda accounts for.
    /// Frames owned here are reported as part of the unterminated
    /// lambda, not as separately unclosed brackets.
    pub(crate) fn owned_open_indices(&self, out: &mut Vec<usize>) {
        out.push(self.intro_idx);
        if let Some(idx) = self.params_open_idx {
            out.push(idx);
        }
        if let Some(idx) = self.spec_open_idx {
            out.push(idx);
        }
        if let Some(idx) = self.attr_open_idx {
            out.push(idx);
            out.push(idx + 1);
        }
        if let Some(idx) = self.body_open_idx {
            out.push(idx);
        }
    }

    /// End-of-input reached before this lambda completed: report
    /// it and close every open span at `eof` rather than dropping
    /// what was recognised so far.
    pub(crate) fn finish_at_eof(
        mut self,
        eof: usize,
        spans: &mut Vec<Span>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::UnterminatedLambda,
            offset: self.intro_start,
            line: self.intro_line,
            column: self.intro_column,
        });
        match self.state {
            LambdaState::CaptureList => {
                self.finish_entry(spans);
                spans.push(Span::new(
                    SpanCategory::CaptureList,
                    (self.intro_start + 1).min(eof),
                    eof,
                ));
                spans.push(Span::new(
                    SpanCategory::LambdaIntroducer,
                    self.intro_start,
                    eof,
                ));
            }
            LambdaState::AfterIntroducer => {}
            LambdaState::ParamList => {
                spans.push(Span::new(
                    SpanCategory::ParameterList,
                    self.params_start,
                    eof,
                ));
            }
            LambdaState::Specifiers => {
                if self.attr_open_idx.is_some() {
                    spans.push(Span::new(SpanCategory::Attribute, self.attr_start, eof));
                }
                if self.spec_open_idx.is_some() {
                    spans.push(Span::new(SpanCategory::ExceptionSpec, self.spec_start, eof));
                }
                if let Some((start, kw_end)) = self.pending_spec {
                    spans.push(Span::new(SpanCategory::ExceptionSpec, start, kw_end));
                }
            }
            LambdaState::TrailingReturn => {
                spans.push(Span::new(
                    SpanCategory::TrailingReturnType,
                    self.ret_start,
                    self.last_sig_end,
                ));
            }
            LambdaState::Body => {
                spans.push(Span::new(SpanCategory::LambdaBody, self.body_start, eof));
            }
        }
    }
}
