use std::fmt;

/// Classifies a recoverable scan condition.
///
/// Nothing in a scan is fatal: every kind here is recovered from
/// locally and scanning continues to end-of-input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// String literal reached end-of-input without a closing `"`.
    UnterminatedString,
    /// Character literal reached end-of-input without a closing `'`.
    UnterminatedChar,
    /// Block comment reached end-of-input without `*/`.
    UnterminatedComment,
    /// A lambda under construction reached end-of-input before its
    /// body closed.
    UnterminatedLambda,
    /// `template` followed by `<` with no plausible closing `>`.
    AmbiguousTemplate,
    /// Closing bracket that does not match the innermost open
    /// bracket; demoted to plain punctuation.
    MismatchedBracket { expected: char, found: char },
    /// Closing bracket with nothing open at all; demoted to plain
    /// punctuation.
    StrayBracket { found: char },
    /// Bracket still open at end-of-input and not owned by a
    /// lambda under construction.
    UnclosedBracket { open: char },
}

impl DiagnosticKind {
    /// Whether this kind reports an unterminated literal or
    /// comment (the tokenizer-level conditions).
    #[must_use]
    pub const fn is_unterminated_literal(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString | Self::UnterminatedChar | Self::UnterminatedComment
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::UnterminatedChar => {
                write!(f, "unterminated character literal")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated block comment")
            }
            Self::UnterminatedLambda => {
                write!(f, "unterminated lambda expression")
            }
            Self::AmbiguousTemplate => {
                write!(f, "template parameter list never closes")
            }
            Self::MismatchedBracket { expected, found } => {
                write!(f, "mismatched bracket: expected '{expected}', got '{found}'")
            }
            Self::StrayBracket { found } => {
                write!(f, "stray '{found}' with no open bracket")
            }
            Self::UnclosedBracket { open } => {
                write!(f, "unclosed '{open}' at end of input")
            }
        }
    }
}

/// A recoverable condition attached to a source location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Byte offset of the construct that triggered the condition.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}
