//! # Grammar Rules
//!
//! This module contains the grammar rules that drive parsing. Each function
//! takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect upcoming tokens (`p.current()`, `p.at()`, `p.nth()`)
//! 2. Consume tokens (`p.bump()`, `p.eat()`, `p.expect()`)
//! 3. Build tree structure (`p.start()` → marker → `complete()`/`abandon()`)
//!
//! ## Module Structure
//!
//! - [`lines`] - One node per `#` line, classified by what follows the hash
//! - [`elements`] - Description text and inline code within a line
//! - [`reference`] - Backtick references and their disambiguation
//! - [`code_block`] - Fenced code spanning several lines
//!
//! ## Error Recovery
//!
//! Grammar functions never fail. A required token that is absent is
//! synthesized by `p.expect()` with a diagnostic; a token no rule accepts is
//! wrapped in an `INVALID_NODE`. The tree always covers the whole input.

mod code_block;
mod elements;
mod lines;
mod reference;

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root documentation node.
///
/// Every line starts with a HASH token. The EOF token closes the root so
/// that trivia after the last line stays in the tree.
pub fn root(p: &mut Parser<'_>) {
    let m = p.start();

    while !p.at_end() {
        if p.at(SyntaxKind::HASH) {
            lines::doc_line(p);
        } else {
            invalid_token(p, DiagnosticCode::SyntaxWarning);
        }
    }
    p.bump();

    m.complete(p, SyntaxKind::DOCUMENTATION);
}

/// Wrap the current token in an `INVALID_NODE` carrying `code`.
fn invalid_token(p: &mut Parser<'_>, code: DiagnosticCode) {
    let m = p.start();
    let text = p.nth_token(0).text.clone();
    p.bump();
    p.error(Diagnostic::new(code, vec![text]));
    m.complete(p, SyntaxKind::INVALID_NODE);
}
