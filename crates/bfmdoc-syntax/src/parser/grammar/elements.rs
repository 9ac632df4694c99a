//! Doc elements: description text, inline code and references.

use super::{invalid_token, reference};
use crate::diagnostics::DiagnosticCode;
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Whether `kind` keeps the element loop of a line going.
pub(super) fn continues_doc_elements(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::DOCUMENTATION_DESCRIPTION
            | SyntaxKind::PLUS
            | SyntaxKind::PARAMETER_NAME
            | SyntaxKind::MINUS
            | SyntaxKind::BACKTICK
            | SyntaxKind::DOUBLE_BACKTICK
            | SyntaxKind::TRIPLE_BACKTICK
            | SyntaxKind::CODE_CONTENT
            | SyntaxKind::RETURN_KEYWORD
            | SyntaxKind::DEPRECATION_LITERAL
    ) || kind.is_doc_reference()
}

/// Parse the elements of the rest of a line and return their kinds.
///
/// Tokens no element starts with are wrapped in `INVALID_NODE` and are not
/// counted as elements.
pub(super) fn doc_elements(p: &mut Parser<'_>) -> Vec<SyntaxKind> {
    let mut elements = Vec::new();
    loop {
        let kind = p.current();
        if !continues_doc_elements(kind) {
            return elements;
        }

        let element = match kind {
            SyntaxKind::DOCUMENTATION_DESCRIPTION => {
                p.bump();
                SyntaxKind::DOCUMENTATION_DESCRIPTION
            }
            SyntaxKind::CODE_CONTENT => {
                p.bump_remap(SyntaxKind::DOCUMENTATION_DESCRIPTION);
                SyntaxKind::DOCUMENTATION_DESCRIPTION
            }
            SyntaxKind::DOUBLE_BACKTICK | SyntaxKind::TRIPLE_BACKTICK => inline_code(p),
            SyntaxKind::BACKTICK => reference::name_or_inline_code(p),
            kind if kind.is_doc_reference() => reference::name_or_inline_code(p),
            _ => {
                invalid_token(p, DiagnosticCode::SyntaxWarning);
                continue;
            }
        };
        elements.push(element);
    }
}

/// Double or triple backtick inline code on one line.
pub(super) fn inline_code(p: &mut Parser<'_>) -> SyntaxKind {
    let m = p.start();
    let fence = p.current();
    p.bump();
    inline_code_content(p);
    p.expect(fence);
    m.complete(p, SyntaxKind::INLINE_CODE);
    SyntaxKind::INLINE_CODE
}

/// Code content, with description text read as code.
pub(super) fn inline_code_content(p: &mut Parser<'_>) {
    match p.current() {
        SyntaxKind::CODE_CONTENT => p.bump(),
        SyntaxKind::DOCUMENTATION_DESCRIPTION => p.bump_remap(SyntaxKind::CODE_CONTENT),
        _ => p.missing(SyntaxKind::CODE_CONTENT),
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::DiagnosticCode;
    use crate::parse;
    use crate::syntax_kind::SyntaxKind::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn description_around_inline_code() {
        let parse = parse("# Adds ``a`` to b");
        let line = parse.syntax().children().next().unwrap();
        let kinds: Vec<_> = line
            .children_with_tokens()
            .map(|e| e.kind())
            .filter(|k| !k.is_trivia())
            .collect();
        assert_eq!(
            kinds,
            vec![HASH, DOCUMENTATION_DESCRIPTION, INLINE_CODE, DOCUMENTATION_DESCRIPTION]
        );
        assert!(parse.diagnostics().is_empty());
    }

    #[test]
    fn empty_inline_code_gets_missing_content() {
        let parse = parse("# x ``````");
        let codes: Vec<_> = parse
            .diagnostics()
            .iter()
            .map(|d| d.diagnostic.code)
            .collect();
        assert_eq!(codes, vec![DiagnosticCode::MissingCodeReference]);
        assert_eq!(parse.syntax().text().to_string(), "# x ``````");
    }
}
