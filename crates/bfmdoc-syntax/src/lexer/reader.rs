//! Character cursor over the source text.

/// A positioned character stream with a movable mark.
///
/// The lexer marks the start of every lexeme and reads the text between the
/// mark and the current position once the lexeme is complete. Positions are
/// byte offsets into the source; peeks are in characters.
#[derive(Debug, Clone)]
pub struct CharReader<'a> {
    source: &'a str,
    pos: usize,
    mark: usize,
}

impl<'a> CharReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            mark: 0,
        }
    }

    /// The next character, or `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` positions ahead; `peek_n(0)` is `peek()`.
    pub fn peek_n(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Advances `n` characters, stopping at end of input.
    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub fn advance_to_end(&mut self) {
        self.pos = self.source.len();
    }

    pub fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Text between the mark and the current position.
    pub fn marked_text(&self) -> &'a str {
        &self.source[self.mark..self.pos]
    }

    /// Unread input.
    pub fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}
