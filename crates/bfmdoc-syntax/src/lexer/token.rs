//! Tokens and the trivia attached to them.

use logos::Logos;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::syntax_kind::SyntaxKind;

/// Raw trivia runs recognised by Logos.
///
/// Only used to measure the trivia run at the cursor; everything else is
/// scanned by hand because what a character means depends on the mode.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TriviaKind {
    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[regex(r"\r\n|\r|\n")]
    EndOfLine,
}

impl TriviaKind {
    fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TriviaKind::Whitespace => SyntaxKind::WHITESPACE,
            TriviaKind::EndOfLine => SyntaxKind::END_OF_LINE,
        }
    }
}

/// Measures the trivia run at the start of `rest`.
///
/// Returns the trivia kind and its length in bytes, or `None` when `rest`
/// does not start with whitespace or a line end.
pub(crate) fn scan_trivia(rest: &str) -> Option<(SyntaxKind, usize)> {
    let mut lexer = TriviaKind::lexer(rest);
    match lexer.next()? {
        Ok(kind) if lexer.span().start == 0 => Some((kind.to_syntax_kind(), lexer.span().len())),
        _ => None,
    }
}

/// A piece of non-semantic text kept for lossless reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    pub kind: SyntaxKind,
    pub text: String,
}

impl Trivia {
    pub fn new(kind: SyntaxKind, text: impl Into<String>) -> Self {
        debug_assert!(kind.is_trivia(), "{kind:?} is not trivia");
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(SyntaxKind::WHITESPACE, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Self::new(SyntaxKind::END_OF_LINE, text)
    }
}

/// A token with its trivia and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Token {
    pub fn new(
        kind: SyntaxKind,
        text: impl Into<String>,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            leading,
            trailing,
            diagnostics: Vec::new(),
        }
    }

    /// A zero-width token the parser synthesizes where one was expected.
    pub fn missing(kind: SyntaxKind) -> Self {
        let mut token = Self::new(kind, "", Vec::new(), Vec::new());
        token
            .diagnostics
            .push(Diagnostic::new(DiagnosticCode::for_missing(kind), Vec::new()));
        token
    }

    /// True for tokens synthesized by [`Token::missing`].
    pub fn is_missing(&self) -> bool {
        self.kind != SyntaxKind::EOF
            && self.text.is_empty()
            && self.leading.is_empty()
            && self.trailing.is_empty()
            && self
                .diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::for_missing(self.kind))
    }

    /// Leading trivia, lexeme and trailing trivia concatenated.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        self.write_full_text(&mut text);
        text
    }

    pub fn write_full_text(&self, out: &mut String) {
        for trivia in &self.leading {
            out.push_str(&trivia.text);
        }
        out.push_str(&self.text);
        for trivia in &self.trailing {
            out.push_str(&trivia.text);
        }
    }

    pub(crate) fn ends_with_newline(&self) -> bool {
        self.trailing
            .last()
            .is_some_and(|t| t.kind == SyntaxKind::END_OF_LINE)
    }
}
