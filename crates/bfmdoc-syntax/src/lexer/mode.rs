//! Lexer modes and the mode stack.

/// The tokenizing routine the lexer runs next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexerMode {
    /// Outside any line; only EOF is produced.
    Default,
    /// Start of a line, expecting `#`.
    LineStartHash,
    /// Just after the line hash, deciding what kind of line this is.
    LineDifferentiator,
    /// Free description text.
    Internal,
    /// Parameter name after `+`.
    Parameter,
    /// Reference keyword before a backtick.
    ReferenceType,
    SingleBacktickContent,
    DoubleBacktickContent,
    TripleBacktickContent,
    /// The closing run of a double or triple backtick span.
    CodeRefEnd,
    /// `#` continuing a fenced code line.
    CodeLineStartHash,
}

/// Line-scoped modes layered over the line-start mode.
///
/// The bottom entry is never popped, so there is always an active mode. The
/// saved backtick mode remembers which fenced content mode a newline
/// interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStack {
    modes: Vec<LexerMode>,
    saved_backtick_mode: LexerMode,
}

impl ModeStack {
    pub fn new(initial: LexerMode) -> Self {
        Self {
            modes: vec![initial],
            saved_backtick_mode: LexerMode::Default,
        }
    }

    pub fn current(&self) -> LexerMode {
        self.modes.last().copied().unwrap_or(LexerMode::Default)
    }

    /// Enters `mode` on top of the current one.
    pub fn start(&mut self, mode: LexerMode) {
        self.modes.push(mode);
    }

    /// Replaces the current mode.
    pub fn switch(&mut self, mode: LexerMode) {
        match self.modes.last_mut() {
            Some(top) => *top = mode,
            None => self.modes.push(mode),
        }
    }

    /// Returns to the enclosing mode. The bottom mode stays.
    pub fn end(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }

    pub fn save_backtick_mode(&mut self) {
        self.saved_backtick_mode = self.current();
    }

    /// Switches back to the mode saved by [`ModeStack::save_backtick_mode`].
    pub fn restore_backtick_mode(&mut self) {
        self.switch(self.saved_backtick_mode);
    }

    /// Drops every line-scoped mode.
    pub fn reset(&mut self) {
        self.modes.truncate(1);
        self.saved_backtick_mode = LexerMode::Default;
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new(LexerMode::LineStartHash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_line_start_hash() {
        assert_eq!(ModeStack::default().current(), LexerMode::LineStartHash);
    }

    #[test]
    fn start_switch_end() {
        let mut modes = ModeStack::default();
        modes.start(LexerMode::LineDifferentiator);
        modes.switch(LexerMode::Internal);
        assert_eq!(modes.current(), LexerMode::Internal);
        modes.end();
        assert_eq!(modes.current(), LexerMode::LineStartHash);
    }

    #[test]
    fn end_keeps_bottom_mode() {
        let mut modes = ModeStack::default();
        modes.end();
        modes.end();
        assert_eq!(modes.current(), LexerMode::LineStartHash);
    }

    #[test]
    fn restores_saved_backtick_mode() {
        let mut modes = ModeStack::default();
        modes.start(LexerMode::TripleBacktickContent);
        modes.save_backtick_mode();
        modes.switch(LexerMode::CodeLineStartHash);
        modes.restore_backtick_mode();
        assert_eq!(modes.current(), LexerMode::TripleBacktickContent);
    }

    #[test]
    fn reset_returns_to_bottom() {
        let mut modes = ModeStack::default();
        modes.start(LexerMode::Parameter);
        modes.switch(LexerMode::SingleBacktickContent);
        modes.reset();
        assert_eq!(modes, ModeStack::default());
    }
}
