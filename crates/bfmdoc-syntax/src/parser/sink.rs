//! Sink for converting parser events into a Rowan green tree.
//!
//! Trivia owned by a token becomes sibling trivia tokens around it: leading
//! trivia first, then the token, then its trailing trivia. Diagnostics are
//! collected with the range and ordinal of the token carrying them.

use rowan::{GreenNodeBuilder, TextRange, TextSize};

use crate::diagnostics::LocatedDiagnostic;
use crate::lexer::{Token, Trivia};
use crate::parser::Parse;
use crate::parser::event::Event;
use crate::syntax_kind::SyntaxKind;

/// Converts parser events and consumed tokens into a Rowan syntax tree.
pub struct Sink {
    builder: GreenNodeBuilder<'static>,
    tokens: std::vec::IntoIter<Token>,
    events: Vec<Event>,
    offset: TextSize,
    token_ordinal: usize,
    diagnostics: Vec<LocatedDiagnostic>,
}

impl Sink {
    /// Create a new sink.
    pub fn new(tokens: Vec<Token>, events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens: tokens.into_iter(),
            events,
            offset: TextSize::default(),
            token_ordinal: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Consume the sink and build the syntax tree.
    pub fn finish(mut self) -> Parse {
        // Process forward_parent links to create proper tree structure
        let mut forward_parents = Vec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    // Collect forward parent chain
                    forward_parents.push(kind);
                    let mut fp = forward_parent;

                    while let Some(parent_idx) = fp {
                        match std::mem::replace(&mut self.events[parent_idx], Event::Placeholder) {
                            Event::Start {
                                kind,
                                forward_parent,
                            } => {
                                fp = forward_parent;
                                forward_parents.push(kind);
                            }
                            _ => unreachable!(),
                        }
                    }

                    // Start nodes in reverse order (outermost first)
                    for kind in forward_parents.drain(..).rev() {
                        self.builder.start_node(kind.into());
                    }
                }
                Event::Token { kind, n_raw_tokens } => {
                    self.token(kind, n_raw_tokens);
                }
                Event::Finish => {
                    self.builder.finish_node();
                }
                Event::Placeholder => {}
            }
        }

        Parse::new(self.builder.finish(), self.diagnostics)
    }

    /// Adds `n_raw_tokens` consumed tokens as one token of `kind`.
    ///
    /// Trivia between merged tokens becomes part of the merged lexeme.
    fn token(&mut self, kind: SyntaxKind, n_raw_tokens: usize) {
        let raw: Vec<Token> = self.tokens.by_ref().take(n_raw_tokens).collect();
        let (Some(first), Some(last)) = (raw.first(), raw.last()) else {
            return;
        };

        let mut text = String::new();
        for (i, token) in raw.iter().enumerate() {
            if i > 0 {
                push_trivia_text(&mut text, &token.leading);
            }
            text.push_str(&token.text);
            if i + 1 < raw.len() {
                push_trivia_text(&mut text, &token.trailing);
            }
        }

        self.trivia(&first.leading);

        let range = TextRange::at(self.offset, TextSize::of(text.as_str()));
        self.builder.token(kind.into(), &text);
        self.offset = range.end();
        for token in &raw {
            for diagnostic in &token.diagnostics {
                self.diagnostics.push(LocatedDiagnostic {
                    diagnostic: diagnostic.clone(),
                    range,
                    token: self.token_ordinal,
                });
            }
        }
        self.token_ordinal += 1;

        self.trivia(&last.trailing);
    }

    fn trivia(&mut self, trivia: &[Trivia]) {
        for piece in trivia {
            self.builder.token(piece.kind.into(), &piece.text);
            self.offset += TextSize::of(piece.text.as_str());
        }
    }
}

fn push_trivia_text(out: &mut String, trivia: &[Trivia]) {
    for piece in trivia {
        out.push_str(&piece.text);
    }
}
