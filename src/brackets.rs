/// One open bracket awaiting its close. Exists only while a scan
/// is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketFrame {
    pub open: u8,
    /// Index of the opening token in the scan's token buffer.
    pub token_index: usize,
    pub expected_close: u8,
}

/// Outcome of offering a closing bracket to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The closer matched the innermost open bracket.
    Matched(BracketFrame),
    /// The closer does not match the innermost open bracket. The
    /// stack is left untouched; the caller demotes the token to
    /// plain punctuation.
    Mismatched { expected: u8 },
    /// No bracket is open at all.
    Stray,
}

/// How a token interacted with the bracket stack, as seen by the
/// recognizers downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketEffect {
    /// The token opened a bracket (its frame is now topmost).
    Open,
    /// The token closed the given frame.
    Close(BracketFrame),
    /// The token did not change the bracket stack.
    Other,
}

/// Stack of open `()`, `{}`, `[]` brackets.
///
/// Angle brackets are not tracked here: `<`/`>` only nest once the
/// template recognizer has disambiguated them from comparison
/// operators, so angle depth lives with that recognizer.
#[derive(Debug, Default)]
pub struct BracketMatcher {
    stack: Vec<BracketFrame>,
}

impl BracketMatcher {
    #[must_use]
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The closing byte pairing with `open`, if `open` is a
    /// bracket this matcher tracks.
    #[must_use]
    pub const fn closing_for(open: u8) -> Option<u8> {
        match open {
            b'(' => Some(b')'),
            b'[' => Some(b']'),
            b'{' => Some(b'}'),
            _ => None,
        }
    }

    /// Push an opening bracket seen at `token_index`.
    pub fn open(&mut self, open: u8, token_index: usize) {
        if let Some(expected_close) = Self::closing_for(open) {
            self.stack.push(BracketFrame {
                open,
                token_index,
                expected_close,
            });
        }
    }

    /// Offer a closing bracket. Pops only on a match, so malformed
    /// input can never corrupt the nesting for enclosing
    /// constructs.
    pub fn close(&mut self, close: u8) -> CloseOutcome {
        match self.stack.last() {
            None => CloseOutcome::Stray,
            Some(frame) if frame.expected_close == close => {
                let frame = *frame;
                self.stack.pop();
                CloseOutcome::Matched(frame)
            }
            Some(frame) => CloseOutcome::Mismatched {
                expected: frame.expected_close,
            },
        }
    }

    /// Frames still open at end-of-input, innermost last.
    #[must_use]
    pub fn into_unclosed(self) -> Vec<BracketFrame> {
        self.stack
    }
}
