//! Typed views over the untyped syntax tree.
//!
//! Each wrapper holds a [`SyntaxNode`] of a known kind and exposes its named
//! children. Casting never fails on a well-formed tree; accessors return
//! `None` only where the grammar makes a child optional.

use rowan::ast::AstNode;

use crate::syntax_kind::{BfmLang, SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $($kind:ident)|+) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            type Language = BfmLang;

            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Documentation, DOCUMENTATION);
ast_node!(
    DocLine,
    DESCRIPTION_LINE
        | REFERENCE_LINE
        | PARAMETER_LINE
        | RETURN_PARAMETER_LINE
        | DEPRECATION_LINE
        | CODE_BLOCK
);
ast_node!(ParameterLine, PARAMETER_LINE | RETURN_PARAMETER_LINE);
ast_node!(CodeBlock, CODE_BLOCK);
ast_node!(CodeLine, CODE_LINE);
ast_node!(InlineCode, INLINE_CODE);
ast_node!(NameReference, NAME_REFERENCE);

/// Non-trivia tokens that are direct children of `node`.
fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    tokens(node).find(|t| t.kind() == kind)
}

impl Documentation {
    pub fn lines(&self) -> impl Iterator<Item = DocLine> + use<> {
        self.0.children().filter_map(DocLine::cast)
    }

    pub fn eof(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::EOF)
    }
}

/// The six kinds of documentation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocLineKind {
    Description,
    Reference,
    Parameter,
    ReturnParameter,
    Deprecation,
    CodeBlock,
}

/// An element within a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocElement {
    /// The `# Deprecated` literal opening a deprecation line.
    Deprecation(SyntaxToken),
    Description(SyntaxToken),
    InlineCode(InlineCode),
    NameReference(NameReference),
}

impl DocLine {
    pub fn kind(&self) -> DocLineKind {
        match self.0.kind() {
            SyntaxKind::REFERENCE_LINE => DocLineKind::Reference,
            SyntaxKind::PARAMETER_LINE => DocLineKind::Parameter,
            SyntaxKind::RETURN_PARAMETER_LINE => DocLineKind::ReturnParameter,
            SyntaxKind::DEPRECATION_LINE => DocLineKind::Deprecation,
            SyntaxKind::CODE_BLOCK => DocLineKind::CodeBlock,
            _ => DocLineKind::Description,
        }
    }

    /// The HASH starting the line.
    pub fn hash(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next().filter(|t| t.kind() == SyntaxKind::HASH)
    }

    pub fn elements(&self) -> impl Iterator<Item = DocElement> + use<> {
        self.0.children_with_tokens().filter_map(|element| match element {
            rowan::NodeOrToken::Token(t) => match t.kind() {
                SyntaxKind::DEPRECATION_LITERAL => Some(DocElement::Deprecation(t)),
                SyntaxKind::DOCUMENTATION_DESCRIPTION => Some(DocElement::Description(t)),
                _ => None,
            },
            rowan::NodeOrToken::Node(n) => InlineCode::cast(n.clone())
                .map(DocElement::InlineCode)
                .or_else(|| NameReference::cast(n).map(DocElement::NameReference)),
        })
    }

    pub fn as_parameter(&self) -> Option<ParameterLine> {
        ParameterLine::cast(self.0.clone())
    }

    pub fn as_code_block(&self) -> Option<CodeBlock> {
        CodeBlock::cast(self.0.clone())
    }

    pub fn deprecation_literal(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::DEPRECATION_LITERAL)
    }
}

impl ParameterLine {
    pub fn plus(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::PLUS)
    }

    /// The parameter name, or the `return` keyword.
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .find(|t| matches!(t.kind(), SyntaxKind::PARAMETER_NAME | SyntaxKind::RETURN_KEYWORD))
    }

    pub fn is_return(&self) -> bool {
        self.0.kind() == SyntaxKind::RETURN_PARAMETER_LINE
    }

    pub fn minus(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::MINUS)
    }

    /// Description text after the hyphen, concatenated.
    pub fn description(&self) -> String {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::DOCUMENTATION_DESCRIPTION)
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl CodeBlock {
    fn fences(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        tokens(&self.0).filter(|t| {
            matches!(
                t.kind(),
                SyntaxKind::DOUBLE_BACKTICK | SyntaxKind::TRIPLE_BACKTICK
            )
        })
    }

    pub fn open_fence(&self) -> Option<SyntaxToken> {
        self.fences().next()
    }

    pub fn close_fence(&self) -> Option<SyntaxToken> {
        self.fences().nth(1)
    }

    /// The language attribute after the opening fence.
    pub fn language(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CODE_CONTENT)
    }

    pub fn code_lines(&self) -> impl Iterator<Item = CodeLine> + use<> {
        self.0.children().filter_map(CodeLine::cast)
    }
}

impl CodeLine {
    pub fn hash(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::HASH)
    }

    pub fn content(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CODE_CONTENT)
    }
}

impl InlineCode {
    pub fn content(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CODE_CONTENT)
    }
}

impl NameReference {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind().is_doc_reference())
    }

    /// The parsed reference shape, absent when the content was not a name.
    pub fn target(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    /// Content kept as code because it did not have a name shape.
    pub fn content(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CODE_CONTENT)
    }
}
