//! Diagnostics attached to tokens by the lexer and parser.
//!
//! Diagnostics never stop parsing. The lexer reports malformed escapes, the
//! parser reports tokens it had to synthesize and markup it could not make
//! sense of. Each code has a stable id and a message template whose `{N}`
//! placeholders are filled from the diagnostic's arguments.

use std::fmt;

use rowan::TextRange;

use crate::syntax_kind::SyntaxKind;

/// Every diagnostic the lexer or parser can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticCode {
    SyntaxWarning,
    InvalidEscapeSequence,
    MissingHashToken,
    MissingSingleBacktick,
    MissingDoubleBacktick,
    MissingTripleBacktick,
    MissingIdentifier,
    MissingOpenParen,
    MissingCloseParen,
    MissingHyphen,
    MissingParameterName,
    MissingCodeReference,
    InvalidNameReference,
    CannotHaveDocumentationInlineWithCodeBlock,
}

/// Codes reported for a synthesized token of the given kind.
const MISSING_TOKEN_CODES: [(SyntaxKind, DiagnosticCode); 10] = [
    (SyntaxKind::HASH, DiagnosticCode::MissingHashToken),
    (SyntaxKind::BACKTICK, DiagnosticCode::MissingSingleBacktick),
    (SyntaxKind::DOUBLE_BACKTICK, DiagnosticCode::MissingDoubleBacktick),
    (SyntaxKind::TRIPLE_BACKTICK, DiagnosticCode::MissingTripleBacktick),
    (SyntaxKind::IDENTIFIER, DiagnosticCode::MissingIdentifier),
    (SyntaxKind::OPEN_PAREN, DiagnosticCode::MissingOpenParen),
    (SyntaxKind::CLOSE_PAREN, DiagnosticCode::MissingCloseParen),
    (SyntaxKind::MINUS, DiagnosticCode::MissingHyphen),
    (SyntaxKind::PARAMETER_NAME, DiagnosticCode::MissingParameterName),
    (SyntaxKind::CODE_CONTENT, DiagnosticCode::MissingCodeReference),
];

impl DiagnosticCode {
    /// Stable identifier, e.g. `BFM1010`.
    pub fn id(self) -> &'static str {
        match self {
            Self::SyntaxWarning => "BFM1000",
            Self::InvalidEscapeSequence => "BFM1001",
            Self::MissingHashToken => "BFM1002",
            Self::MissingSingleBacktick => "BFM1003",
            Self::MissingDoubleBacktick => "BFM1004",
            Self::MissingTripleBacktick => "BFM1005",
            Self::MissingIdentifier => "BFM1006",
            Self::MissingOpenParen => "BFM1007",
            Self::MissingCloseParen => "BFM1008",
            Self::MissingHyphen => "BFM1009",
            Self::MissingParameterName => "BFM1010",
            Self::MissingCodeReference => "BFM1011",
            Self::InvalidNameReference => "BFM1012",
            Self::CannotHaveDocumentationInlineWithCodeBlock => "BFM1013",
        }
    }

    pub fn message_template(self) -> &'static str {
        match self {
            Self::SyntaxWarning => "invalid token '{0}'",
            Self::InvalidEscapeSequence => "invalid escape sequence '{0}'",
            Self::MissingHashToken => "missing '#' token",
            Self::MissingSingleBacktick => "missing '`' token",
            Self::MissingDoubleBacktick => "missing '``' token",
            Self::MissingTripleBacktick => "missing '```' token",
            Self::MissingIdentifier => "missing identifier",
            Self::MissingOpenParen => "missing '(' token",
            Self::MissingCloseParen => "missing ')' token",
            Self::MissingHyphen => "missing '-' token",
            Self::MissingParameterName => "missing parameter name",
            Self::MissingCodeReference => "missing code reference",
            Self::InvalidNameReference => "invalid name reference '{0}'",
            Self::CannotHaveDocumentationInlineWithCodeBlock => {
                "documentation '{0}' cannot follow a code block on the same line"
            }
        }
    }

    /// The code reported when a token of `kind` has to be synthesized.
    pub fn for_missing(kind: SyntaxKind) -> Self {
        MISSING_TOKEN_CODES
            .iter()
            .find(|(missing, _)| *missing == kind)
            .map(|(_, code)| *code)
            .unwrap_or(Self::SyntaxWarning)
    }
}

/// A diagnostic as carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, args: Vec<String>) -> Self {
        Self { code, args }
    }

    /// The message template with its placeholders filled in.
    pub fn message(&self) -> String {
        let mut message = self.code.message_template().to_string();
        for (index, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{index}}}"), arg);
        }
        message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.id(), self.message())
    }
}

/// A diagnostic placed in the built tree.
///
/// `token` is the ordinal of the owning token among the non-trivia tokens of
/// the tree, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedDiagnostic {
    pub diagnostic: Diagnostic,
    pub range: TextRange,
    pub token: usize,
}
