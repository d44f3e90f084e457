/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier that is not a reserved word.
    Identifier,
    /// C/C++ reserved word (`template`, `return`, `throw`, ...).
    Keyword,
    /// Operator, including multi-character forms (`->`, `::`, `...`).
    Operator,
    /// Structural punctuation: `(` `)` `[` `]` `{` `}` `;` `,` and
    /// any byte that cannot start another token.
    Punctuation,
    /// Numeric literal (pp-number: integers, floats, hex, separators).
    Number,
    /// Double-quoted string literal.
    Str,
    /// Single-quoted character literal.
    CharLit,
    /// Line (`//`) or block (`/* */`) comment.
    Comment,
    /// Run of whitespace, including newlines.
    Whitespace,
    /// Preprocessor logical line (`#` first on its line, with
    /// backslash continuations folded in).
    Preprocessor,
}

impl TokenKind {
    /// Whether tokens of this kind take part in structural
    /// recognition. Whitespace and comments are carried for
    /// round-tripping but skipped by the recognizers.
    #[must_use]
    pub const fn is_significant(self) -> bool {
        !matches!(self, Self::Whitespace | Self::Comment)
    }
}

/// A single token with its kind and location in the source buffer.
///
/// Tokens are immutable once produced. `start`/`end` are byte
/// offsets; consecutive tokens are contiguous, so concatenating
/// their texts reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    /// Borrow this token's text from the source buffer it was
    /// produced from.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}
