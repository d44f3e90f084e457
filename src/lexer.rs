use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::stream::CharStream;
use crate::token::{Token, TokenKind};

/// Result of eagerly tokenizing a buffer: the token sequence plus
/// any recoverable conditions encountered along the way.
///
/// Tokenizing never fails. Unterminated literals and comments
/// extend to end-of-input and are reported here instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize a source buffer into a contiguous token sequence.
///
/// Concatenating the text of every token reproduces the input
/// exactly, whitespace and comments included.
#[must_use]
pub fn tokenize(input: &str) -> Lexed {
    tokenize_from(input, 0, 1)
}

/// Tokenize starting at `offset`, reporting positions relative to
/// the given line number. Used for incremental re-scans of a
/// sub-region when only part of a buffer changed.
#[must_use]
pub fn tokenize_from(input: &str, offset: usize, line: usize) -> Lexed {
    let mut lexer = Lexer::from_offset(input, offset, line);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    Lexed {
        tokens,
        diagnostics: lexer.into_diagnostics(),
    }
}

/// Pull-based tokenizer over a source buffer.
///
/// Yields one token at a time; the recognizers downstream consume
/// tokens on demand, so no lexing happens ahead of need.
pub struct Lexer<'a> {
    source: &'a str,
    stream: CharStream<'a>,
    /// Only whitespace (or nothing) seen since the last newline.
    /// Controls whether `#` starts a preprocessor line.
    at_line_start: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::from_offset(input, 0, 1)
    }

    #[must_use]
    pub fn from_offset(input: &'a str, offset: usize, line: usize) -> Self {
        Self {
            source: input,
            stream: CharStream::from_offset(input, offset, line),
            at_line_start: true,
            diagnostics: Vec::new(),
        }
    }

    /// Diagnostics collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Produce the next token, or `None` at end-of-input.
    pub fn next_token(&mut self) -> Option<Token> {
        let b = self.stream.first()?;
        let start = self.stream.position();
        let line = self.stream.line();
        let column = self.stream.column();

        let kind = if is_space(b) || (start == 0 && self.has_bom()) {
            self.read_whitespace()
        } else if b == b'/' && matches!(self.stream.peek(1), Some(b'/' | b'*')) {
            self.read_comment(start, line, column)
        } else if b == b'"' {
            self.read_string(start, line, column)
        } else if b == b'\'' {
            self.read_char_literal(start, line, column)
        } else if b == b'#' && self.at_line_start {
            self.read_preprocessor_line()
        } else if b.is_ascii_digit() || (b == b'.' && self.peek_is_digit(1)) {
            self.read_number()
        } else if is_ident_start(b) {
            self.read_identifier(start)
        } else {
            self.read_operator(b)
        };

        if kind == TokenKind::Whitespace {
            let text = &self.source[start..self.stream.position()];
            if text.contains('\n') {
                self.at_line_start = true;
            }
        } else {
            self.at_line_start = false;
        }

        Some(Token {
            kind,
            start,
            end: self.stream.position(),
            line,
            column,
        })
    }

    fn has_bom(&self) -> bool {
        self.stream.peek(0) == Some(0xEF)
            && self.stream.peek(1) == Some(0xBB)
            && self.stream.peek(2) == Some(0xBF)
    }

    fn peek_is_digit(&self, k: usize) -> bool {
        self.stream.peek(k).is_some_and(|b| b.is_ascii_digit())
    }

    fn read_whitespace(&mut self) -> TokenKind {
        // A BOM at offset zero is folded into the leading
        // whitespace token so the round-trip invariant holds.
        if self.stream.position() == 0 && self.has_bom() {
            self.stream.advance();
            self.stream.advance();
            self.stream.advance();
        }
        self.stream.advance_while(is_space);
        TokenKind::Whitespace
    }

    fn read_comment(&mut self, start: usize, line: usize, column: usize) -> TokenKind {
        self.stream.advance(); // /
        if self.stream.first() == Some(b'/') {
            self.stream.advance_while(|b| b != b'\n');
            return TokenKind::Comment;
        }
        self.stream.advance(); // *
        loop {
            match self.stream.first() {
                None => {
                    self.diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::UnterminatedComment,
                        offset: start,
                        line,
                        column,
                    });
                    break;
                }
                Some(b'*') if self.stream.peek(1) == Some(b'/') => {
                    self.stream.advance();
                    self.stream.advance();
                    break;
                }
                Some(_) => {
                    self.stream.advance();
                }
            }
        }
        TokenKind::Comment
    }

    fn read_string(&mut self, start: usize, line: usize, column: usize) -> TokenKind {
        self.read_quoted(b'"', DiagnosticKind::UnterminatedString, start, line, column);
        TokenKind::Str
    }

    fn read_char_literal(&mut self, start: usize, line: usize, column: usize) -> TokenKind {
        self.read_quoted(b'\'', DiagnosticKind::UnterminatedChar, start, line, column);
        TokenKind::CharLit
    }

    /// Scan a quoted literal with backslash escapes. Braces and
    /// brackets inside never confuse the structural layer because
    /// the whole literal is one token. An unterminated literal
    /// extends to end-of-input and is reported; scanning does not
    /// abort.
    fn read_quoted(
        &mut self,
        quote: u8,
        unterminated: DiagnosticKind,
        start: usize,
        line: usize,
        column: usize,
    ) {
        self.stream.advance(); // opening quote
        loop {
            match self.stream.first() {
                None => {
                    self.diagnostics.push(Diagnostic {
                        kind: unterminated,
                        offset: start,
                        line,
                        column,
                    });
                    break;
                }
                Some(b'\\') => {
                    self.stream.advance();
                    self.stream.advance();
                }
                Some(b) => {
                    self.stream.advance();
                    if b == quote {
                        break;
                    }
                }
            }
        }
    }

    /// Consume a preprocessor logical line, honouring backslash
    /// continuations. The trailing newline is left for the next
    /// whitespace token.
    fn read_preprocessor_line(&mut self) -> TokenKind {
        let mut prev = b'#';
        while let Some(b) = self.stream.first() {
            if b == b'\n' && prev != b'\\' {
                break;
            }
            self.stream.advance();
            if b != b'\r' {
                prev = b;
            }
        }
        TokenKind::Preprocessor
    }

    /// pp-number: digits, identifier characters, `.`, digit
    /// separators, and exponent signs after `e`/`E`/`p`/`P`.
    fn read_number(&mut self) -> TokenKind {
        while let Some(b) = self.stream.first() {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' {
                self.stream.advance();
                if matches!(b, b'e' | b'E' | b'p' | b'P')
                    && matches!(self.stream.first(), Some(b'+' | b'-'))
                {
                    self.stream.advance();
                }
            } else if b == b'\''
                && self
                    .stream
                    .peek(1)
                    .is_some_and(|c| c.is_ascii_alphanumeric())
            {
                // digit separator, as in 1'000'000
                self.stream.advance();
            } else {
                break;
            }
        }
        TokenKind::Number
    }

    fn read_identifier(&mut self, start: usize) -> TokenKind {
        self.stream.advance_while(is_ident_continue);
        if is_keyword(&self.source[start..self.stream.position()]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }

    /// Greedy longest-match operator scan. This matters for the
    /// structural layer: `&` and `=` are standalone capture
    /// defaults but also prefixes of `&&`, `&=`, `==`, and `->`
    /// must never split into `-` `>`.
    fn read_operator(&mut self, b: u8) -> TokenKind {
        let len = self.operator_len();
        for _ in 0..len {
            self.stream.advance();
        }
        if len > 1 {
            return TokenKind::Operator;
        }
        match b {
            b'+' | b'-' | b'*' | b'/' | b'%' | b'<' | b'>' | b'=' | b'!' | b'&' | b'|' | b'^'
            | b'~' | b'.' | b'?' | b':' => TokenKind::Operator,
            _ => TokenKind::Punctuation,
        }
    }

    fn operator_len(&self) -> usize {
        let b0 = self.stream.peek(0).unwrap_or(0);
        let b1 = self.stream.peek(1).unwrap_or(0);
        let b2 = self.stream.peek(2).unwrap_or(0);
        match (b0, b1, b2) {
            (b'<', b'<', b'=')
            | (b'>', b'>', b'=')
            | (b'-', b'>', b'*')
            | (b'.', b'.', b'.')
            | (b'<', b'=', b'>') => 3,
            (b':', b':', _)
            | (b'-', b'>' | b'-' | b'=', _)
            | (b'+', b'+' | b'=', _)
            | (b'<', b'<' | b'=', _)
            | (b'>', b'>' | b'=', _)
            | (b'=' | b'!' | b'*' | b'/' | b'%' | b'^', b'=', _)
            | (b'&', b'&' | b'=', _)
            | (b'|', b'|' | b'=', _)
            | (b'.', b'*', _) => 2,
            _ => 1,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

const fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn is_keyword(text: &str) -> bool {
    matches!(
        text,
        "alignas"
            | "alignof"
            | "asm"
            | "auto"
            | "bool"
            | "break"
            | "case"
            | "catch"
            | "char"
            | "char8_t"
            | "char16_t"
            | "char32_t"
            | "class"
            | "concept"
            | "const"
            | "consteval"
            | "constexpr"
            | "constinit"
            | "const_cast"
            | "continue"
            | "co_await"
            | "co_return"
            | "co_yield"
            | "decltype"
            | "default"
            | "delete"
            | "do"
            | "double"
            | "dynamic_cast"
            | "else"
            | "enum"
            | "explicit"
            | "export"
            | "extern"
            | "false"
            | "float"
            | "for"
            | "friend"
            | "goto"
            | "if"
            | "inline"
            | "int"
            | "long"
            | "mutable"
            | "namespace"
            | "new"
            | "noexcept"
            | "nullptr"
            | "operator"
            | "private"
            | "protected"
            | "public"
            | "register"
            | "reinterpret_cast"
            | "requires"
            | "return"
            | "short"
            | "signed"
            | "sizeof"
            | "static"
            | "static_assert"
            | "static_cast"
            | "struct"
            | "switch"
            | "template"
            | "this"
            | "thread_local"
            | "throw"
            | "true"
            | "try"
            | "typedef"
            | "typeid"
            | "typename"
            | "union"
            | "unsigned"
            | "using"
            | "virtual"
            | "void"
            | "volatile"
            | "wchar_t"
            | "while"
    )
}
