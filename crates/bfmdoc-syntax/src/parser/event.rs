//! The flat event list the grammar records and the sink replays.
//!
//! A documentation line such as `# + x - the param` is recorded as
//!
//! ```text
//! Start(PARAMETER_LINE)
//! Token(HASH) Token(PLUS) Token(PARAMETER_NAME) Token(MINUS)
//! Token(DOCUMENTATION_DESCRIPTION)
//! Finish
//! ```
//!
//! Every `Token` event takes its tokens, trivia included, from the list of
//! tokens the parser consumed or synthesized, in order.
//!
//! A name reference is only known to be the callee of a call once the
//! parser reaches `(` or `.`. [`CompletedMarker::precede`] then records a
//! `forward_parent` on the name's `Start`, and the sink opens the
//! `FUNCTION_CALL` or `METHOD_CALL` node before the name.
//!
//! [`CompletedMarker::precede`]: crate::parser::CompletedMarker::precede

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Opens a node. `forward_parent` is the index of a later `Start` that
    /// wraps this one.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// `n_raw_tokens` consumed tokens, emitted as one tree token of `kind`.
    ///
    /// More than one raw token is merged for backtick content that is not a
    /// name, e.g. `a + b`. The kind may differ from the lexer's, as when code
    /// content is read as description text.
    Token { kind: SyntaxKind, n_raw_tokens: usize },

    Finish,

    /// Left by `Parser::start` until the marker is completed, and by the
    /// sink once a forward parent has been opened.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    /// A token event for one raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::DocLexer;
    use crate::parser::{Parser, grammar};

    #[test]
    fn token_event_takes_one_raw_token() {
        assert_eq!(
            Event::token(SyntaxKind::HASH),
            Event::Token {
                kind: SyntaxKind::HASH,
                n_raw_tokens: 1
            }
        );
    }

    #[test]
    fn call_records_forward_parent() {
        let mut parser = Parser::new(DocLexer::new("# `f()`"));
        grammar::root(&mut parser);

        let forward = parser.events.iter().find_map(|event| match event {
            Event::Start {
                kind: SyntaxKind::SIMPLE_NAME_REFERENCE,
                forward_parent,
            } => Some(*forward_parent),
            _ => None,
        });
        let Some(Some(parent)) = forward else {
            panic!("name reference has no forward parent: {:?}", parser.events);
        };
        assert!(matches!(
            parser.events[parent],
            Event::Start {
                kind: SyntaxKind::FUNCTION_CALL,
                ..
            }
        ));
    }
}
