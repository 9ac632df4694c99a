//! Buffered lookahead over the lexer.

use std::collections::VecDeque;

use crate::lexer::{DocLexer, Token};
use crate::syntax_kind::SyntaxKind;

/// Pulls tokens from the lexer on demand and keeps the ones peeked at.
///
/// Lookahead is unbounded: `peek_n` lexes as far ahead as asked. Past the end
/// of input the lexer keeps producing empty EOF tokens.
pub struct TokenReader<'a> {
    lexer: DocLexer<'a>,
    buffer: VecDeque<Token>,
}

impl<'a> TokenReader<'a> {
    pub fn new(lexer: DocLexer<'a>) -> Self {
        Self {
            lexer,
            buffer: VecDeque::new(),
        }
    }

    pub fn peek(&mut self) -> &Token {
        self.peek_n(0)
    }

    /// The token `n` positions ahead without consuming; `peek_n(0)` is `peek()`.
    pub fn peek_n(&mut self, n: usize) -> &Token {
        while self.buffer.len() <= n {
            let token = self.lexer.next_token();
            self.buffer.push_back(token);
        }
        &self.buffer[n]
    }

    pub fn peek_kind(&mut self, n: usize) -> SyntaxKind {
        self.peek_n(n).kind
    }

    pub fn read(&mut self) -> Token {
        match self.buffer.pop_front() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }
}
