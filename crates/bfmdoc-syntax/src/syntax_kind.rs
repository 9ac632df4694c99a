//! SyntaxKind enum for all tokens and nodes in the documentation CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the documentation CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Trivia ===
    /// Run of spaces, tabs or form feeds
    WHITESPACE,
    /// `\n`, `\r` or `\r\n`
    END_OF_LINE,
    /// Input the lexer could not place in any token
    INVALID_TEXT,

    // === Tokens (lexer output) ===
    /// `#` opening every documentation line
    HASH,
    /// `+` opening a parameter line
    PLUS,
    /// `-` separating a parameter name from its description
    MINUS,
    /// `# Deprecated` after the line hash
    DEPRECATION_LITERAL,
    /// Name after `+` on a parameter line
    PARAMETER_NAME,
    /// `return` after `+`
    RETURN_KEYWORD,
    /// Free description text
    DOCUMENTATION_DESCRIPTION,
    /// Single backtick
    BACKTICK,
    /// Double backtick run
    DOUBLE_BACKTICK,
    /// Triple backtick run
    TRIPLE_BACKTICK,
    /// Opaque text inside backticks
    CODE_CONTENT,
    /// Identifier inside single backticks
    IDENTIFIER,
    /// `.` inside single backticks
    DOT,
    /// `:` inside single backticks
    COLON,
    /// `(` inside single backticks
    OPEN_PAREN,
    /// `)` inside single backticks
    CLOSE_PAREN,
    /// `type` reference keyword
    TYPE_DOC_REFERENCE,
    /// `service` reference keyword
    SERVICE_DOC_REFERENCE,
    /// `variable` reference keyword
    VARIABLE_DOC_REFERENCE,
    /// `var` reference keyword
    VAR_DOC_REFERENCE,
    /// `annotation` reference keyword
    ANNOTATION_DOC_REFERENCE,
    /// `module` reference keyword
    MODULE_DOC_REFERENCE,
    /// `function` reference keyword
    FUNCTION_DOC_REFERENCE,
    /// `parameter` reference keyword
    PARAMETER_DOC_REFERENCE,
    /// `const` reference keyword
    CONST_DOC_REFERENCE,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root node: documentation lines followed by EOF
    DOCUMENTATION,
    /// Line holding at most one description
    DESCRIPTION_LINE,
    /// Line holding inline code, references or several elements
    REFERENCE_LINE,
    /// `# + name - description`
    PARAMETER_LINE,
    /// `# + return - description`
    RETURN_PARAMETER_LINE,
    /// `# # Deprecated` line
    DEPRECATION_LINE,
    /// Fenced code block spanning several lines
    CODE_BLOCK,
    /// One line inside a fenced code block
    CODE_LINE,
    /// Backtick-delimited code that is not a name reference
    INLINE_CODE,
    /// Backtick-delimited reference, optionally keyword-prefixed
    NAME_REFERENCE,
    /// `ident`
    SIMPLE_NAME_REFERENCE,
    /// `module:ident`
    QUALIFIED_NAME_REFERENCE,
    /// `ident()`
    FUNCTION_CALL,
    /// `Type.method()`
    METHOD_CALL,

    /// Error recovery node
    INVALID_NODE,
}

use SyntaxKind::*;

/// Reserved words that may prefix a backtick reference.
const DOC_REFERENCE_WORDS: [(&str, SyntaxKind); 9] = [
    ("type", TYPE_DOC_REFERENCE),
    ("service", SERVICE_DOC_REFERENCE),
    ("variable", VARIABLE_DOC_REFERENCE),
    ("var", VAR_DOC_REFERENCE),
    ("annotation", ANNOTATION_DOC_REFERENCE),
    ("module", MODULE_DOC_REFERENCE),
    ("function", FUNCTION_DOC_REFERENCE),
    ("parameter", PARAMETER_DOC_REFERENCE),
    ("const", CONST_DOC_REFERENCE),
];

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace, line ends, invalid text).
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | END_OF_LINE | INVALID_TEXT)
    }

    /// Returns true for the reference keywords (`type`, `function`, ...).
    pub fn is_doc_reference(self) -> bool {
        DOC_REFERENCE_WORDS.iter().any(|(_, kind)| *kind == self)
    }

    /// Returns true for the tokens that may appear between single backticks.
    pub fn is_backtick_expr(self) -> bool {
        matches!(
            self,
            IDENTIFIER | DOT | COLON | OPEN_PAREN | CLOSE_PAREN | CODE_CONTENT
        )
    }

    /// Looks up the keyword kind for a reserved reference word.
    pub fn from_reference_word(word: &str) -> Option<SyntaxKind> {
        DOC_REFERENCE_WORDS
            .iter()
            .find(|(text, _)| *text == word)
            .map(|(_, kind)| *kind)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BfmLang {}

impl rowan::Language for BfmLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::INVALID_NODE as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<BfmLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<BfmLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<BfmLang>;
