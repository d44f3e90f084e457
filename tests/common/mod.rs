#![allow(dead_code)]

use cppscan_rs::{ScanResult, SpanCategory, scan, tokenize};

/// Assert that concatenating every token (whitespace included)
/// reproduces the input byte-for-byte.
pub fn assert_roundtrip(input: &str) {
    let lexed = tokenize(input);
    let rebuilt: String = lexed.tokens.iter().map(|t| t.text(input)).collect();
    assert_eq!(
        rebuilt, input,
        "token round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{rebuilt}"
    );
}

/// Texts of every span of `category`, in result order.
pub fn span_texts(input: &str, category: SpanCategory) -> Vec<String> {
    scan(input)
        .spans
        .iter()
        .filter(|s| s.category == category)
        .map(|s| s.text(input).to_string())
        .collect()
}

/// Number of spans of `category` in an existing result.
pub fn count(result: &ScanResult, category: SpanCategory) -> usize {
    result
        .spans
        .iter()
        .filter(|s| s.category == category)
        .count()
}

/// Every lambda shape worth recognising: empty and non-empty
/// capture lists, by-value and by-reference captures, trailing
/// return types (including array and pointer types), exception
/// specifications and attributes in either order, immediately
/// invoked lambdas, init-captures whose initializer is itself a
/// lambda, and one spread over many lines. The inner body of
/// `part` deliberately lacks a final semicolon; recognition must
/// not depend on statement well-formedness.
pub const LAMBDA_CORPUS: &str = r#"void lambda_corpus() {
    [](int x, int y) { return x + y; };

    [](int x, int y) -> int {
        int z = x + y;
        return z + x;
    };

    std::vector<int> items;
    int sum = 0;
    std::for_each(items.begin(), items.end(), [&sum](int x) {
                                                  sum += x;
                                              });
    std::cout << sum;

    std::for_each(items.begin(), items.end(), [&](int x) {
                                                  sum += x;
                                              });

    int scale = 5;
    [&, scale](int x) { sum += (x * scale); };

    [](Widget *w) { w->refresh(); } (widget);

    auto handler = [this]() {
                       this->refresh(); };
    auto handler2 = [this] {
                        this->refresh(); };

    auto handler3 = [this] (int x) -> char * {
                        return "text";
                    };
    auto handler4 = [name](int x) -> char [] {
                        return name;
                    };
    auto handler5 = [this](int x) [[noreturn]] -> void {
                        std::exit ();
                    };
    auto handler6 = [this](int x) throw (int, double) -> void {
                        std::exit ();
                    };
    auto handler7 = [this](int x) throw (int, double) [[noreturn]] -> void {
                        std::exit ();
                    };

    auto handler8 = [&, sum, part = [&sum] () -> int {
                                        return sum} (5)] () -> void {
                        combine (sum, part);
                    };
    auto handler9 = [lo, &hi] () -> int {return 0;};
    auto handler10 = [&, lo, &hi] () -> int {return 0;};
    auto handler11 = [=, lo, &hi] () -> int {return 0;};

    auto handler12 =
        [
            &,
            lo,
            part = [
                &sum
            ]
            (int x)
            ->
            int
            {
                return sum += x;
            } (5),
            hi
        ]
        (int x)
        throw (int)
        ->
        int
        {
            return 0;
        };
}
"#;

/// Deep template nesting: argument lists inside argument lists,
/// `sizeof...` parentheses hiding angle candidates, and lists
/// spanning several lines.
pub const TEMPLATE_CORPUS: &str = r"template <typename Arg, typename... Args>
struct Dispatcher<Arg, Args...> :
    Dispatcher<IndexSeq<RefCount<Arg>::value>,
               IndexSeq<sizeof...(Args) - RefCount<Arg>::value, RefCount<Arg>::value>,
               Arg, Args...>
{
    using Parent = Dispatcher<
        IndexSeq<RefCount<Arg>::value>,
        IndexSeq<sizeof...(Args) + 1 - RefCount<Arg>::value,
                 RefCount<Arg>::value>, Arg, Args...>;
    using Parent::Dispatcher;
};
";

/// Declaration-heavy C++ with template argument lists in typedefs
/// but no lambdas.
pub const DECLS_CORPUS: &str = r"template<class GV>
void assemble_q2 (const GV& gv)
{
  typedef typename GV::Grid::ctype Coord;
  typedef double Real;

  typedef fem::QkElementMap<GV,Coord,Real,2> FEM;
  FEM elems(gv);
  typedef fem::DirichletConstraints CON;
  typedef fem::VectorBackend<> VBE;
  typedef fem::FunctionSpace<GV,FEM,CON,VBE> GFS;
  GFS gfs(gv,elems);
}
";

/// Macro-style C: an iteration macro followed by a bare compound
/// statement. Produces no spans and no diagnostics.
pub const MACRO_CORPUS: &str = r"void flush_frames (void)
{
    Object tail, frame;

    FOR_EACH_FRAME (tail, frame)
        {
            struct frame *fr = XFRAME (frame);
            if (FRAME_CACHE (fr) == cache)
                clear_matrices (fr);
        }

    windows_changed = 19;
}
";
