//! # Parser - Event-Based Tree Construction
//!
//! This module implements the core parsing logic, transforming the lexer's
//! token stream into a syntax tree using the **event-based** architecture
//! from rust-analyzer.
//!
//! ## Pulling Tokens
//!
//! The lexer is modal, so tokens cannot be produced up front without knowing
//! where each line starts. The parser pulls them on demand through a
//! [`TokenReader`], which buffers whatever the grammar peeks at. Every token
//! the parser consumes, or synthesizes, is moved into a flat list that the
//! [`Sink`] later walks in step with the events.
//!
//! ## The Event Model
//!
//! Parsing produces events like:
//! ```text
//! Start(DESCRIPTION_LINE)
//! Token(HASH)
//! Token(DOCUMENTATION_DESCRIPTION)
//! Finish
//! ```
//!
//! The Sink processes these in order, calling `start_node()` for Start,
//! `token()` for Token (plus the token's trivia), and `finish_node()` for
//! Finish.
//!
//! ## Never Failing
//!
//! Parsing always produces a tree. Where the grammar expects a token that is
//! not there, [`Parser::expect`] inserts a zero-width *missing* token carrying
//! a diagnostic. Tokens that fit nowhere are wrapped in `INVALID_NODE`.
//!
//! ## The Marker System
//!
//! When you call `parser.start()`, you get a [`Marker`]. This marker **must**
//! be either completed with `marker.complete(parser, KIND)` or abandoned with
//! `marker.abandon(parser)`. Dropping it otherwise panics.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::CODE_LINE);
//! ```
//!
//! ## Public API
//!
//! The main entry point is [`parse`]:
//!
//! ```
//! use bfmdoc_syntax::{parse, SyntaxKind};
//!
//! let parse = parse("# + x - the param\n");
//! let line = parse.syntax().children().next().unwrap();
//! assert_eq!(line.kind(), SyntaxKind::PARAMETER_LINE);
//! ```

pub mod event;
pub mod sink;
pub mod token_reader;

mod grammar;

use rowan::GreenNode;

use crate::diagnostics::{Diagnostic, LocatedDiagnostic};
use crate::lexer::{DocLexer, Token, Trivia};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;
use token_reader::TokenReader;

/// The parser state machine.
///
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `bump_remap()`, `bump_n()`, `eat()`
/// - Synthesize tokens: `expect()`, `missing()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'a> {
    tokens: TokenReader<'a>,
    consumed: Vec<Token>,
    events: Vec<Event>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: DocLexer<'a>) -> Self {
        Self {
            tokens: TokenReader::new(lexer),
            consumed: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Parse the token stream and return a syntax tree.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let sink = Sink::new(self.consumed, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind.
    pub fn current(&mut self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&mut self, n: usize) -> SyntaxKind {
        self.tokens.peek_kind(n)
    }

    /// The token n positions ahead.
    pub fn nth_token(&mut self, n: usize) -> &Token {
        self.tokens.peek_n(n)
    }

    /// Check if at end of input.
    pub fn at_end(&mut self) -> bool {
        self.at(SyntaxKind::EOF)
    }

    /// Check if current token is of given kind.
    pub fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        let kind = self.current();
        self.bump_n(1, kind);
    }

    /// Consume the current token as a token of another kind.
    pub fn bump_remap(&mut self, kind: SyntaxKind) {
        self.bump_n(1, kind);
    }

    /// Consume n tokens as a single composite token.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        for _ in 0..n {
            let token = self.tokens.read();
            self.consumed.push(token);
        }
        self.events.push(Event::Token {
            kind,
            n_raw_tokens: n,
        });
    }

    /// Consume the current token if it matches, otherwise insert a missing
    /// token of that kind.
    pub fn expect(&mut self, kind: SyntaxKind) {
        if !self.eat(kind) {
            self.missing(kind);
        }
    }

    /// Insert a zero-width token with the diagnostic for its kind.
    pub fn missing(&mut self, kind: SyntaxKind) {
        log::debug!("missing {kind:?} before {:?}", self.current());
        self.consumed.push(Token::missing(kind));
        self.events.push(Event::token(kind));
    }

    /// Insert a zero-width token without any diagnostic.
    pub fn empty(&mut self, kind: SyntaxKind) {
        self.consumed
            .push(Token::new(kind, "", Vec::new(), Vec::new()));
        self.events.push(Event::token(kind));
    }

    /// Attach a diagnostic to the token consumed last.
    pub fn error(&mut self, diagnostic: Diagnostic) {
        if let Some(token) = self.consumed.last_mut() {
            token.diagnostics.push(diagnostic);
        }
    }
}

/// A marker for a node being constructed.
///
/// The `#[must_use]` attribute and the `Drop` impl together enforce that
/// every marker is either completed or abandoned.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Abandon this marker without creating a node.
    ///
    /// If other events were pushed after `start()`, the placeholder becomes
    /// inert and is ignored by the Sink.
    pub fn abandon(mut self, p: &mut Parser<'_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A marker for a node that has been completed.
///
/// `precede()` wraps the completed node in a new parent, which is how a
/// name reference becomes the callee of a `FUNCTION_CALL` once the parser
/// sees the parentheses.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    pub fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        // Update the original Start event to point to this new parent
        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// The result of parsing: an immutable tree plus the diagnostics found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Vec<LocatedDiagnostic>,
}

impl Parse {
    pub(crate) fn new(green: GreenNode, diagnostics: Vec<LocatedDiagnostic>) -> Self {
        Self { green, diagnostics }
    }

    /// The root `DOCUMENTATION` node.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Diagnostics in document order.
    pub fn diagnostics(&self) -> &[LocatedDiagnostic] {
        &self.diagnostics
    }

    /// The canonical JSON rendering, see [`crate::canonical::to_json`].
    pub fn to_json(&self) -> serde_json::Value {
        crate::canonical::to_json(self)
    }

    /// The indented text rendering, see [`crate::canonical::debug_tree`].
    pub fn debug_tree(&self) -> String {
        crate::canonical::debug_tree(self)
    }
}

/// Parse one documentation comment into a syntax tree.
pub fn parse(source: &str) -> Parse {
    parse_with_trivia(source, Vec::new(), Vec::new())
}

/// Parse with trivia and diagnostics that precede the comment, attached to
/// its first token.
pub fn parse_with_trivia(
    source: &str,
    leading_trivia: Vec<Trivia>,
    diagnostics: Vec<Diagnostic>,
) -> Parse {
    log::debug!("parsing {} bytes of documentation", source.len());
    let lexer = DocLexer::with_leading_trivia(source, leading_trivia, diagnostics);
    Parser::new(lexer).parse()
}
