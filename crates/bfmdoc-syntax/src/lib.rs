//! # bfmdoc-syntax
//!
//! A lossless syntax tree for BFM documentation comments using [Rowan] and
//! [Logos], following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What is a Documentation Comment?
//!
//! A documentation comment is a run of lines that each start with `#`. The
//! text after the hash decides what the line is:
//!
//! ```text
//! # Adds two numbers.                   ← description
//! # See function `math:add()`.          ← reference
//! # + a - the first operand             ← parameter
//! # + return - the sum                  ← return parameter
//! # # Deprecated                        ← deprecation
//! # ```ballerina                        ← code block, up to the closing fence
//! # int x = add(1, 2);
//! # ```
//! ```
//!
//! ## Lossless and Never Failing
//!
//! The tree preserves **every byte** of the input. Whitespace and line ends
//! are trivia tokens placed next to the token they belong to, and text the
//! lexer could not classify is kept as `INVALID_TEXT` trivia.
//!
//! Parsing never fails. Where a required token is absent, the parser inserts
//! a zero-width *missing* token and attaches a diagnostic to it; tokens that
//! fit nowhere are wrapped in `INVALID_NODE`.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!              (modal)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! The lexer is a stack of modes. What a character means depends on where
//! the line is: after the hash, inside a parameter, inside backticks, inside
//! a code block. Each token carries its own leading and trailing trivia.
//!
//! ### 2. Parser ([`parser`] module)
//!
//! The parser pulls tokens on demand, emits **events** and uses a **marker
//! system** to build nested structures. Backtick references are
//! disambiguated by looking ahead without consuming anything.
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! The sink replays the events into a Rowan green tree, laying out trivia as
//! sibling tokens and collecting diagnostics with their ranges.
//!
//! ## Module Structure
//!
//! ```text
//! bfmdoc-syntax/
//! ├── lib.rs             # This file - public API and integration tests
//! ├── syntax_kind.rs     # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── diagnostics.rs     # Diagnostic codes and messages
//! ├── lexer/             # Modal lexer, mode stack, tokens with trivia
//! ├── parser/
//! │   ├── mod.rs         # Parser struct, Marker system, public parse() function
//! │   ├── token_reader.rs# Lazy lookahead over the lexer
//! │   ├── event.rs       # Event enum (Start, Token, Finish, Placeholder)
//! │   ├── sink.rs        # Converts events to Rowan GreenNode
//! │   └── grammar/       # Lines, elements, references, code blocks
//! ├── ast.rs             # Typed wrappers over the tree
//! └── canonical.rs       # JSON and text renderings
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use bfmdoc_syntax::{parse, SyntaxKind};
//!
//! let parse = parse("# + x - the value\n");
//! let tree = parse.syntax();
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "# + x - the value\n");
//!
//! // Navigate the tree structure
//! assert_eq!(tree.kind(), SyntaxKind::DOCUMENTATION);
//! let line = tree.children().next().unwrap();
//! assert_eq!(line.kind(), SyntaxKind::PARAMETER_LINE);
//! assert!(parse.diagnostics().is_empty());
//! ```

pub mod ast;
pub mod canonical;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use diagnostics::{Diagnostic, DiagnosticCode, LocatedDiagnostic};
pub use lexer::{Token, Trivia};
pub use parser::{Parse, parse, parse_with_trivia};
pub use syntax_kind::{BfmLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    const INPUTS: &[&str] = &[
        "",
        "#",
        "# Description\n",
        "# Description\r\n# second line\r\n",
        "  # indented\n\t# tabbed",
        "# + a - first\n# + return - result",
        "# +\n# + - x\n# + a b",
        "# # Deprecated\n# #Deprecated\n# # deprecated",
        "# See `x` and ``y`` and ```z```",
        "# function `foo()` type `T` variable `v`",
        "# method `obj.run(1, 2)` const `mod:NAME`",
        "# function `` unclosed",
        "# parameter `a b c` annotation `@x`",
        "# ```ballerina\n# int x = 1;\n#\n# ```",
        "# ```\n# never closed",
        "# ```\n# x\n# ``` trailing",
        "# ``\n# code\n# ``",
        "not a comment\n# then one",
        "# escape \\t and \\u{41} and \\",
        "# `",
        "# ``",
        "# ```",
        "##\n###\n# `a`b`c`",
        "# \u{1F600} unicode `é`",
    ];

    #[test]
    fn roundtrip_preserves_text() {
        for input in INPUTS {
            let tree = parse(input).syntax();
            assert_eq!(
                tree.text().to_string(),
                *input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }

    #[test]
    fn lexed_tokens_preserve_text() {
        for input in INPUTS {
            let text: String = lexer::lex(input).iter().map(Token::full_text).collect();
            assert_eq!(text, *input, "Lexing lost text for: {:?}", input);
        }
    }

    #[test]
    fn root_ends_with_eof() {
        for input in INPUTS {
            let tree = parse(input).syntax();
            assert_eq!(tree.kind(), SyntaxKind::DOCUMENTATION);
            let last = tree
                .children_with_tokens()
                .filter(|e| !e.kind().is_trivia())
                .last()
                .unwrap();
            assert_eq!(last.kind(), SyntaxKind::EOF, "for {:?}", input);
        }
    }

    #[test]
    fn diagnostics_are_in_document_order() {
        for input in INPUTS {
            let parse = parse(input);
            let ordinals: Vec<_> = parse.diagnostics().iter().map(|d| d.token).collect();
            let mut sorted = ordinals.clone();
            sorted.sort();
            assert_eq!(ordinals, sorted, "for {:?}", input);
        }
    }

    #[test]
    fn missing_tokens_are_zero_width() {
        let missing_codes: Vec<_> = [
            SyntaxKind::HASH,
            SyntaxKind::BACKTICK,
            SyntaxKind::DOUBLE_BACKTICK,
            SyntaxKind::TRIPLE_BACKTICK,
            SyntaxKind::IDENTIFIER,
            SyntaxKind::OPEN_PAREN,
            SyntaxKind::CLOSE_PAREN,
            SyntaxKind::MINUS,
            SyntaxKind::PARAMETER_NAME,
            SyntaxKind::CODE_CONTENT,
        ]
        .into_iter()
        .map(DiagnosticCode::for_missing)
        .collect();

        for input in INPUTS {
            let parse = parse(input);
            for located in parse.diagnostics() {
                if missing_codes.contains(&located.diagnostic.code) {
                    assert!(located.range.is_empty(), "for {:?}", input);
                }
            }
        }
    }

    #[test]
    fn parsing_is_deterministic() {
        for input in INPUTS {
            assert_eq!(parse(input).to_json(), parse(input).to_json());
        }
    }

    #[test]
    fn leading_trivia_is_kept() {
        let parse = parse_with_trivia("# x", vec![Trivia::whitespace("  ")], Vec::new());
        assert_eq!(parse.syntax().text().to_string(), "  # x");
    }

    #[test]
    fn snapshot_parameter_line() {
        assert_snapshot!(parse("# + a - b").debug_tree(), @r##"
        DOCUMENTATION@0..9
          PARAMETER_LINE@0..9
            HASH@0..1 "#"
            WHITESPACE@1..2 " "
            PLUS@2..3 "+"
            WHITESPACE@3..4 " "
            PARAMETER_NAME@4..5 "a"
            WHITESPACE@5..6 " "
            MINUS@6..7 "-"
            WHITESPACE@7..8 " "
            DOCUMENTATION_DESCRIPTION@8..9 "b"
          EOF@9..9 ""
        "##);
    }
}
