//! Documentation lines.

use super::{code_block, elements};
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse one line, starting at its HASH token.
pub(super) fn doc_line(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();

    let kind = match p.current() {
        SyntaxKind::PLUS => parameter_line(p),
        SyntaxKind::DEPRECATION_LITERAL => {
            p.bump();
            elements::doc_elements(p);
            SyntaxKind::DEPRECATION_LINE
        }
        SyntaxKind::DOUBLE_BACKTICK | SyntaxKind::TRIPLE_BACKTICK => {
            if is_inline_code(p) {
                elements::inline_code(p);
                elements::doc_elements(p);
                SyntaxKind::REFERENCE_LINE
            } else {
                code_block::code_block(p);
                SyntaxKind::CODE_BLOCK
            }
        }
        _ => {
            let elements = elements::doc_elements(p);
            match elements.as_slice() {
                [] | [SyntaxKind::DOCUMENTATION_DESCRIPTION] => SyntaxKind::DESCRIPTION_LINE,
                _ => SyntaxKind::REFERENCE_LINE,
            }
        }
    };

    m.complete(p, kind);
}

/// `+ name - description` or `+ return - description`.
fn parameter_line(p: &mut Parser<'_>) -> SyntaxKind {
    p.bump();
    let kind = if p.eat(SyntaxKind::RETURN_KEYWORD) {
        SyntaxKind::RETURN_PARAMETER_LINE
    } else {
        p.expect(SyntaxKind::PARAMETER_NAME);
        SyntaxKind::PARAMETER_LINE
    };
    p.expect(SyntaxKind::MINUS);
    elements::doc_elements(p);
    kind
}

/// Decides whether a double or triple run at the cursor opens inline code
/// or a fenced block.
///
/// A fence is followed by the next line's hash (not followed by description
/// text), or by a language attribute that ends the line.
fn is_inline_code(p: &mut Parser<'_>) -> bool {
    match p.nth(1) {
        SyntaxKind::HASH => p.nth(2) == SyntaxKind::DOCUMENTATION_DESCRIPTION,
        SyntaxKind::CODE_CONTENT => p.nth(2) != SyntaxKind::HASH,
        _ => true,
    }
}
