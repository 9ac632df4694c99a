//! # Lexer - Tokenizing Documentation Comments
//!
//! This module provides the first stage of parsing: turning the character
//! stream of one documentation comment into tokens, one token per
//! [`DocLexer::next_token`] call.
//!
//! ## Modes
//!
//! What a character means depends on where it appears. A `-` separates a
//! parameter name from its description on a `# +` line but is plain text
//! elsewhere; a `.` is a token between single backticks and text outside
//! them. The lexer therefore runs a small state machine ([`LexerMode`]) and
//! each mode has its own tokenizing routine:
//!
//! ```text
//! "# + x - the param\n"
//!  LineStartHash      → HASH            (starts LineDifferentiator)
//!  LineDifferentiator → PLUS            (switches to Parameter)
//!  Parameter          → PARAMETER_NAME, MINUS (switches to Internal)
//!  Internal           → DOCUMENTATION_DESCRIPTION + trailing "\n" (ends the line)
//! ```
//!
//! ## The Lossless Guarantee
//!
//! Every character of the input ends up either in a token's lexeme or in the
//! trivia attached to it. Concatenating leading trivia, lexeme and trailing
//! trivia of every token reproduces the input:
//!
//! ```
//! use bfmdoc_syntax::lexer::lex;
//!
//! let input = "# Adds `a` and `b`.\n# + a - first\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.full_text()).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! Input that cannot start a line (anything but `#` after leading trivia)
//! ends the token stream; it is kept as `INVALID_TEXT` trivia on the EOF
//! token.
//!
//! ## Trivia
//!
//! Whitespace and line-end runs are measured with [Logos]. Which runs belong
//! to a token depends on the token: most tokens take trailing whitespace up
//! to and including the first line end, identifiers inside backticks take
//! none, and backtick runs take only a directly following line end.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Public API
//!
//! - [`lex`] - Tokenize input up to and including EOF
//! - [`DocLexer`] - Pull tokens one at a time
//! - [`Token`] / [`Trivia`] - A token with its trivia and diagnostics

mod mode;
mod reader;
mod token;

pub use mode::{LexerMode, ModeStack};
pub use reader::CharReader;
pub use token::{Token, Trivia};

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::syntax_kind::SyntaxKind;
use token::scan_trivia;

const DEPRECATED_LITERAL: &str = "Deprecated";

/// The mode-driven documentation lexer.
pub struct DocLexer<'a> {
    reader: CharReader<'a>,
    modes: ModeStack,
    leading_trivia: Vec<Trivia>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> DocLexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_leading_trivia(source, Vec::new(), Vec::new())
    }

    /// Creates a lexer whose first token carries the given trivia and
    /// diagnostics, e.g. what precedes the comment in its enclosing file.
    pub fn with_leading_trivia(
        source: &'a str,
        leading_trivia: Vec<Trivia>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            reader: CharReader::new(source),
            modes: ModeStack::default(),
            leading_trivia,
            diagnostics,
        }
    }

    pub fn mode(&self) -> LexerMode {
        self.modes.current()
    }

    /// Produces the next token. At end of input this is EOF, in every mode.
    pub fn next_token(&mut self) -> Token {
        let mode = self.modes.current();
        let mut token = match mode {
            LexerMode::LineStartHash => {
                self.process_leading_trivia();
                self.read_line_start_hash()
            }
            LexerMode::LineDifferentiator => {
                self.process_leading_trivia();
                self.read_line_differentiator()
            }
            LexerMode::Internal => self.read_internal(),
            LexerMode::Parameter => {
                self.process_leading_trivia();
                self.read_parameter()
            }
            LexerMode::ReferenceType => {
                self.process_leading_trivia();
                self.read_reference_type()
            }
            LexerMode::SingleBacktickContent => self.read_single_backtick_content(),
            LexerMode::DoubleBacktickContent => self.read_code_content(2),
            LexerMode::TripleBacktickContent => self.read_code_content(3),
            LexerMode::CodeRefEnd => self.read_code_ref_end(),
            LexerMode::CodeLineStartHash => {
                self.process_leading_trivia();
                self.read_code_line_start_hash()
            }
            LexerMode::Default => {
                self.reader.mark();
                self.eof_token()
            }
        };

        token.diagnostics.append(&mut self.diagnostics);
        if token.kind == SyntaxKind::EOF {
            self.modes.reset();
        }

        log::trace!(
            "{:?} {:?} in {:?} -> {:?}",
            token.kind,
            token.text,
            mode,
            self.modes.current()
        );
        token
    }

    fn read_line_start_hash(&mut self) -> Token {
        self.reader.mark();
        if self.reader.peek() == Some('#') {
            self.reader.advance();
            self.modes.start(LexerMode::LineDifferentiator);
            return self.doc_token(SyntaxKind::HASH);
        }
        self.eof_token()
    }

    fn read_line_differentiator(&mut self) -> Token {
        match (self.reader.peek(), self.reader.peek_n(1)) {
            (Some('+'), _) => {
                self.reader.advance();
                self.modes.switch(LexerMode::Parameter);
                self.doc_token(SyntaxKind::PLUS)
            }
            (Some('#'), _) => {
                self.modes.switch(LexerMode::Internal);
                self.read_deprecation_literal()
            }
            (Some('`'), Some('`')) => {
                self.reader.advance_n(2);
                if self.reader.peek() == Some('`') {
                    self.reader.advance();
                    self.modes.switch(LexerMode::TripleBacktickContent);
                    self.code_start_backtick_token(SyntaxKind::TRIPLE_BACKTICK)
                } else {
                    self.modes.switch(LexerMode::DoubleBacktickContent);
                    self.code_start_backtick_token(SyntaxKind::DOUBLE_BACKTICK)
                }
            }
            _ => {
                self.modes.switch(LexerMode::Internal);
                self.read_internal()
            }
        }
    }

    /// `#`, optional spaces or tabs, then exactly `Deprecated`.
    fn read_deprecation_literal(&mut self) -> Token {
        let rest = self.reader.rest();
        let spaces = rest[1..]
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        if !rest[1 + spaces..].starts_with(DEPRECATED_LITERAL) {
            return self.read_internal();
        }

        self.reader.mark();
        self.reader.advance_n(1 + spaces + DEPRECATED_LITERAL.len());
        self.token_without_trivia(SyntaxKind::DEPRECATION_LITERAL)
    }

    fn read_internal(&mut self) -> Token {
        self.reader.mark();
        if self.reader.is_eof() {
            return self.eof_token();
        }

        if self.reader.peek() == Some('`') {
            self.reader.advance();
            if self.reader.peek() != Some('`') {
                self.modes.switch(LexerMode::SingleBacktickContent);
                return self.token_without_trivia(SyntaxKind::BACKTICK);
            }
            self.reader.advance();
            if self.reader.peek() != Some('`') {
                self.modes.switch(LexerMode::DoubleBacktickContent);
                return self.code_start_backtick_token(SyntaxKind::DOUBLE_BACKTICK);
            }
            self.reader.advance();
            self.modes.switch(LexerMode::TripleBacktickContent);
            return self.code_start_backtick_token(SyntaxKind::TRIPLE_BACKTICK);
        }

        let mut at_reference = false;
        while let Some(c) = self.reader.peek() {
            match c {
                '\n' | '\r' => {
                    self.modes.end();
                    break;
                }
                '`' => break,
                c if is_identifier_initial_char(c) => {
                    if self.scan_reference_word() {
                        self.modes.switch(LexerMode::ReferenceType);
                        at_reference = true;
                        break;
                    }
                }
                _ => self.reader.advance(),
            }
        }

        if at_reference && self.reader.marked_text().is_empty() {
            return self.read_reference_type();
        }
        self.literal(SyntaxKind::DOCUMENTATION_DESCRIPTION)
    }

    /// Skips the word at the cursor unless it is a reference keyword
    /// followed, after spaces or tabs, by a single backtick.
    fn scan_reference_word(&mut self) -> bool {
        let rest = self.reader.rest();
        let word_len: usize = rest
            .chars()
            .take_while(|c| is_identifier_initial_char(*c))
            .map(char::len_utf8)
            .sum();
        let word = &rest[..word_len];
        let mut skip = word.chars().count();

        if SyntaxKind::from_reference_word(word).is_some() {
            let after = &rest[word_len..];
            let spaces = after
                .bytes()
                .take_while(|b| *b == b' ' || *b == b'\t')
                .count();
            let tail = &after[spaces..];
            if tail.starts_with('`') && !tail[1..].starts_with('`') {
                return true;
            }
            skip += spaces;
        }

        self.reader.advance_n(skip);
        false
    }

    fn read_parameter(&mut self) -> Token {
        self.reader.mark();
        match self.reader.peek() {
            Some(c) if is_possible_identifier_start(c) => {
                if c != '\\' {
                    self.reader.advance();
                }
                self.process_identifier_end();
                let kind = if self.reader.marked_text() == "return" {
                    SyntaxKind::RETURN_KEYWORD
                } else {
                    SyntaxKind::PARAMETER_NAME
                };
                let token = self.doc_token(kind);
                if self.reader.peek() != Some('-')
                    && self.modes.current() != LexerMode::LineStartHash
                {
                    self.modes.switch(LexerMode::Internal);
                }
                token
            }
            Some('-') => {
                self.reader.advance();
                self.modes.switch(LexerMode::Internal);
                self.doc_token(SyntaxKind::MINUS)
            }
            _ => {
                self.modes.switch(LexerMode::Internal);
                self.read_internal()
            }
        }
    }

    fn read_reference_type(&mut self) -> Token {
        if self.reader.peek() == Some('`') {
            self.reader.advance();
            self.modes.switch(LexerMode::SingleBacktickContent);
            return self.token_without_trivia(SyntaxKind::BACKTICK);
        }

        while self.reader.peek().is_some_and(is_identifier_initial_char) {
            self.reader.advance();
        }
        match SyntaxKind::from_reference_word(self.reader.marked_text()) {
            Some(kind) => self.doc_token(kind),
            None => self.eof_token(),
        }
    }

    fn read_single_backtick_content(&mut self) -> Token {
        self.reader.mark();
        let Some(c) = self.reader.peek() else {
            return self.eof_token();
        };

        if c == '\\' {
            self.process_identifier_end();
            return self.identifier_token();
        }

        self.reader.advance();
        match c {
            '`' => {
                self.modes.switch(LexerMode::Internal);
                self.token_without_trivia(SyntaxKind::BACKTICK)
            }
            '.' => self.doc_token(SyntaxKind::DOT),
            ':' => self.doc_token(SyntaxKind::COLON),
            '(' => self.doc_token(SyntaxKind::OPEN_PAREN),
            ')' => self.doc_token(SyntaxKind::CLOSE_PAREN),
            c if is_possible_identifier_start(c) => {
                self.process_identifier_end();
                self.identifier_token()
            }
            _ => {
                while self
                    .reader
                    .peek()
                    .is_some_and(|c| !matches!(c, '`' | '\n' | '\r'))
                {
                    self.reader.advance();
                }
                self.doc_token(SyntaxKind::CODE_CONTENT)
            }
        }
    }

    /// Content of a double or triple backtick span, up to a run of exactly
    /// `fence_len` backticks or a line end.
    fn read_code_content(&mut self, fence_len: usize) -> Token {
        self.reader.mark();
        if self.reader.is_eof() {
            return self.eof_token();
        }

        while let Some(c) = self.reader.peek() {
            match c {
                '`' => {
                    let run = self.backtick_run_len();
                    if run == fence_len {
                        self.modes.switch(LexerMode::CodeRefEnd);
                        break;
                    }
                    self.reader.advance_n(run);
                }
                '\n' | '\r' => {
                    self.modes.save_backtick_mode();
                    self.modes.switch(LexerMode::CodeLineStartHash);
                    break;
                }
                _ => self.reader.advance(),
            }
        }

        if self.reader.marked_text().is_empty() && self.modes.current() == LexerMode::CodeRefEnd {
            return self.read_code_ref_end();
        }
        self.literal(SyntaxKind::CODE_CONTENT)
    }

    fn read_code_ref_end(&mut self) -> Token {
        self.modes.switch(LexerMode::Internal);
        self.reader.mark();
        match self.backtick_run_len() {
            0 | 1 => self.eof_token(),
            2 => {
                self.reader.advance_n(2);
                self.token_without_trivia(SyntaxKind::DOUBLE_BACKTICK)
            }
            _ => {
                self.reader.advance_n(3);
                self.token_without_trivia(SyntaxKind::TRIPLE_BACKTICK)
            }
        }
    }

    fn read_code_line_start_hash(&mut self) -> Token {
        self.reader.mark();
        if self.reader.peek() != Some('#') {
            return self.eof_token();
        }
        self.reader.advance();

        let leading = std::mem::take(&mut self.leading_trivia);
        let lexeme = self.reader.marked_text();
        let mut trailing = Vec::new();
        match self.reader.peek() {
            Some(' ' | '\t' | '\x0C') => {
                self.reader.mark();
                self.reader.advance();
                trailing.push(Trivia::whitespace(self.reader.marked_text()));
                if self.at_newline() {
                    trailing.push(self.process_end_of_line());
                } else {
                    self.modes.restore_backtick_mode();
                }
            }
            Some('\n' | '\r') => trailing.push(self.process_end_of_line()),
            _ => self.modes.restore_backtick_mode(),
        }
        Token::new(SyntaxKind::HASH, lexeme, leading, trailing)
    }

    /// Consumes the rest of an identifier, including escapes.
    fn process_identifier_end(&mut self) {
        while let Some(c) = self.reader.peek() {
            if is_identifier_following_char(c) {
                self.reader.advance();
                continue;
            }
            if c != '\\' {
                break;
            }
            match self.reader.peek_n(1) {
                Some(escaped @ ('\n' | '\r' | '\t')) => {
                    self.reader.advance();
                    self.report(
                        DiagnosticCode::InvalidEscapeSequence,
                        escaped.escape_debug().to_string(),
                    );
                    break;
                }
                Some('u') if self.reader.peek_n(2) == Some('{') => self.process_numeric_escape(),
                _ => self.reader.advance_n(2),
            }
        }
    }

    /// `\u{hex+}`; stops at the first character that does not fit.
    fn process_numeric_escape(&mut self) {
        self.reader.advance_n(3);
        if !self.reader.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            return;
        }
        while self.reader.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.reader.advance();
        }
        if self.reader.peek() == Some('}') {
            self.reader.advance();
        }
    }

    fn report(&mut self, code: DiagnosticCode, arg: String) {
        self.diagnostics.push(Diagnostic::new(code, vec![arg]));
    }

    fn backtick_run_len(&self) -> usize {
        self.reader.rest().bytes().take_while(|b| *b == b'`').count()
    }

    fn at_newline(&self) -> bool {
        matches!(self.reader.peek(), Some('\n' | '\r'))
    }

    // === Trivia ===

    fn process_leading_trivia(&mut self) {
        let mut trivia = std::mem::take(&mut self.leading_trivia);
        self.process_syntax_trivia(&mut trivia, true);
        self.leading_trivia = trivia;
    }

    fn process_trailing_trivia(&mut self) -> Vec<Trivia> {
        let mut trivia = Vec::new();
        self.process_syntax_trivia(&mut trivia, false);
        trivia
    }

    /// Collects whitespace and line ends. Trailing trivia stops after the
    /// first line end. Leaves the mark at the first non-trivia character.
    fn process_syntax_trivia(&mut self, trivia: &mut Vec<Trivia>, is_leading: bool) {
        loop {
            self.reader.mark();
            let Some((kind, len)) = scan_trivia(self.reader.rest()) else {
                return;
            };
            // trivia is ASCII, so bytes and chars agree
            self.reader.advance_n(len);
            trivia.push(Trivia::new(kind, self.reader.marked_text()));
            if kind == SyntaxKind::END_OF_LINE && !is_leading {
                return;
            }
        }
    }

    /// Consumes one line end at the cursor.
    fn process_end_of_line(&mut self) -> Trivia {
        self.reader.mark();
        if self.reader.peek() == Some('\r') {
            self.reader.advance();
            if self.reader.peek() == Some('\n') {
                self.reader.advance();
            }
        } else {
            self.reader.advance();
        }
        Trivia::end_of_line(self.reader.marked_text())
    }

    // === Token construction ===

    /// Lexeme with full trailing trivia; a trailing line end ends the mode.
    fn doc_token(&mut self, kind: SyntaxKind) -> Token {
        let token = self.literal(kind);
        if token.ends_with_newline() {
            self.modes.end();
        }
        token
    }

    /// Lexeme with full trailing trivia; the mode is left alone.
    fn literal(&mut self, kind: SyntaxKind) -> Token {
        let leading = std::mem::take(&mut self.leading_trivia);
        let lexeme = self.reader.marked_text();
        let trailing = self.process_trailing_trivia();
        Token::new(kind, lexeme, leading, trailing)
    }

    fn identifier_token(&mut self) -> Token {
        let leading = std::mem::take(&mut self.leading_trivia);
        Token::new(
            SyntaxKind::IDENTIFIER,
            self.reader.marked_text(),
            leading,
            Vec::new(),
        )
    }

    /// Lexeme plus a directly following line end, which ends the mode.
    fn token_without_trivia(&mut self, kind: SyntaxKind) -> Token {
        let leading = std::mem::take(&mut self.leading_trivia);
        let lexeme = self.reader.marked_text();
        let mut trailing = Vec::new();
        if self.at_newline() {
            trailing.push(self.process_end_of_line());
            self.modes.end();
        }
        Token::new(kind, lexeme, leading, trailing)
    }

    /// Opening double or triple run. A directly following line end makes it
    /// a fence: the content mode is saved and the next line starts with `#`.
    fn code_start_backtick_token(&mut self, kind: SyntaxKind) -> Token {
        let leading = std::mem::take(&mut self.leading_trivia);
        let lexeme = self.reader.marked_text();
        let mut trailing = Vec::new();
        if self.at_newline() {
            trailing.push(self.process_end_of_line());
            self.modes.save_backtick_mode();
            self.modes.switch(LexerMode::CodeLineStartHash);
        }
        Token::new(kind, lexeme, leading, trailing)
    }

    /// EOF, carrying whatever input is left as invalid text.
    fn eof_token(&mut self) -> Token {
        let mut leading = std::mem::take(&mut self.leading_trivia);
        self.reader.advance_to_end();
        let rest = self.reader.marked_text();
        if !rest.is_empty() {
            leading.push(Trivia::new(SyntaxKind::INVALID_TEXT, rest));
        }
        self.reader.mark();
        Token::new(SyntaxKind::EOF, "", leading, Vec::new())
    }
}

/// Tokenize a whole documentation comment, up to and including EOF.
pub fn lex(source: &str) -> Vec<Token> {
    let mut lexer = DocLexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::EOF;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

fn is_identifier_initial_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!c.is_ascii() && c.is_alphanumeric())
}

fn is_identifier_following_char(c: char) -> bool {
    is_identifier_initial_char(c) || c.is_ascii_digit()
}

fn is_possible_identifier_start(c: char) -> bool {
    c == '\'' || c == '\\' || is_identifier_initial_char(c)
}
