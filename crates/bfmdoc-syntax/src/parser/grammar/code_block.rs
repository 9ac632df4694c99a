//! Fenced code blocks.
//!
//! ```text
//! # ```ballerina        ← opening fence, optional language attribute
//! # int x = 1;          ← CODE_LINE
//! #                     ← CODE_LINE with empty content
//! # ```                 ← closing hash and fence
//! ```

use super::elements::{continues_doc_elements, inline_code_content};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse a fenced block after the line hash, starting at its fence.
pub(super) fn code_block(p: &mut Parser<'_>) {
    let fence = p.current();
    p.bump();
    p.eat(SyntaxKind::CODE_CONTENT);

    while at_code_line(p) {
        code_line(p);
    }

    p.expect(SyntaxKind::HASH);
    p.expect(fence);

    // Nothing may follow the closing fence on its line.
    while continues_doc_elements(p.current()) {
        let m = p.start();
        let text = p.nth_token(0).text.clone();
        p.bump();
        p.error(Diagnostic::new(
            DiagnosticCode::CannotHaveDocumentationInlineWithCodeBlock,
            vec![text],
        ));
        m.complete(p, SyntaxKind::INVALID_NODE);
    }
}

fn at_code_line(p: &mut Parser<'_>) -> bool {
    p.at(SyntaxKind::HASH) && matches!(p.nth(1), SyntaxKind::CODE_CONTENT | SyntaxKind::HASH)
}

fn code_line(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();
    if p.at(SyntaxKind::HASH) {
        p.empty(SyntaxKind::CODE_CONTENT);
    } else {
        inline_code_content(p);
    }
    m.complete(p, SyntaxKind::CODE_LINE);
}
