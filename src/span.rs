/// Categories assigned to classified spans.
///
/// Delimited categories (`LambdaIntroducer`, `ParameterList`,
/// `ExceptionSpec`, `Attribute`, `LambdaBody`, and both template
/// list kinds) include their delimiters. `CaptureList` covers the
/// interior between `[` and `]`; `Capture` entries and
/// `TrailingReturnType` are trimmed to significant tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanCategory {
    /// The whole `[...]` lambda introducer, brackets included.
    LambdaIntroducer,
    /// One capture entry: `x`, `&x`, `this`, `&`, `=`, or an
    /// init-capture `name = expr`.
    Capture,
    /// Interior of the capture list, between the brackets.
    CaptureList,
    /// Lambda parameter list `(...)`, parens included.
    ParameterList,
    /// Trailing return type, from `->` to the last token before
    /// the body `{`.
    TrailingReturnType,
    /// Exception specification: `throw (...)` or `noexcept (...)`.
    ExceptionSpec,
    /// One attribute block `[[...]]`.
    Attribute,
    /// Lambda body `{...}`, braces included.
    LambdaBody,
    /// Template parameter list `<...>` following the `template`
    /// keyword.
    TemplateParamList,
    /// Template argument list `<...>` following a template name.
    TemplateArgList,
}

/// A classified region of the source buffer, produced by the
/// recognizers. Spans may nest but never partially intersect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub category: SpanCategory,
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(category: SpanCategory, start: usize, end: usize) -> Self {
        Self {
            category,
            start,
            end,
        }
    }

    /// Borrow this span's text from the source buffer.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Whether `other` lies entirely within this span.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
