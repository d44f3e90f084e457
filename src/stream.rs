/// Byte cursor over a source buffer with line/column tracking.
///
/// End-of-input is a valid terminal condition, not an error:
/// `peek` returns `None` past the end and `advance` becomes a
/// no-op. Columns count bytes from 1, which matches how the
/// surrounding tooling reports positions for ASCII-dominated
/// source.
#[derive(Debug)]
pub struct CharStream<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> CharStream<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::from_offset(input, 0, 1)
    }

    /// Start the cursor at `offset` with the given line number,
    /// for incremental re-scans of a sub-region.
    #[must_use]
    pub fn from_offset(input: &'a str, offset: usize, line: usize) -> Self {
        Self {
            input: input.as_bytes(),
            pos: offset.min(input.len()),
            line,
            col: 1,
        }
    }

    /// Byte `k` positions ahead without consuming.
    #[must_use]
    pub fn peek(&self, k: usize) -> Option<u8> {
        self.input.get(self.pos + k).copied()
    }

    /// The byte at the cursor.
    #[must_use]
    pub fn first(&self) -> Option<u8> {
        self.peek(0)
    }

    /// Consume one byte, updating line and column.
    pub fn advance(&mut self) -> Option<u8> {
        let b = self.first()?;
        if b == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
        Some(b)
    }

    /// Consume bytes while `pred` holds.
    pub fn advance_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.first().is_some_and(&pred) {
            self.advance();
        }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.col
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
