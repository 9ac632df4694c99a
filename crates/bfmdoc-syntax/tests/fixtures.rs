//! Golden tests over the documentation fixtures under `tests/fixtures/`.
//!
//! `build.rs` generates one test per fixture. Each pins the parse tree,
//! diagnostics included, to the committed snapshot
//! `tests/snapshots/fixtures__<name>.snap`, after checking that the tree
//! reproduces the file byte for byte and that parsing is deterministic.

use std::path::Path;

use bfmdoc_syntax::{DiagnosticCode, SyntaxKind, parse};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.bfm"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

fn fixture_test(name: &str, source: &str) {
    let first = parse(source);
    assert_eq!(first.syntax().text().to_string(), source, "fixture {name} lost text");
    assert_eq!(
        first.to_json(),
        parse(source).to_json(),
        "fixture {name} is not deterministic"
    );

    let tree = first.debug_tree();
    assert_snapshot!(name, tree);
}

include!(concat!(env!("OUT_DIR"), "/fixture_tests.rs"));

fn line_kinds(source: &str) -> Vec<SyntaxKind> {
    parse(source).syntax().children().map(|n| n.kind()).collect()
}

#[test]
fn function_doc_lines() {
    let source = read_fixture("function_doc");
    assert_eq!(
        line_kinds(&source),
        vec![
            SyntaxKind::DESCRIPTION_LINE,
            SyntaxKind::REFERENCE_LINE,
            SyntaxKind::PARAMETER_LINE,
            SyntaxKind::PARAMETER_LINE,
            SyntaxKind::RETURN_PARAMETER_LINE,
        ]
    );
    assert!(parse(&source).diagnostics().is_empty());
}

#[test]
fn code_block_spans_its_lines() {
    let source = read_fixture("code_block");
    assert_eq!(
        line_kinds(&source),
        vec![
            SyntaxKind::DESCRIPTION_LINE,
            SyntaxKind::CODE_BLOCK,
            SyntaxKind::DESCRIPTION_LINE,
        ]
    );
    assert!(parse(&source).diagnostics().is_empty());
}

#[test]
fn unclosed_code_block_gets_missing_fence() {
    let source = read_fixture("unclosed_code_block");
    let codes: Vec<_> = parse(&source)
        .diagnostics()
        .iter()
        .map(|d| d.diagnostic.code)
        .collect();
    assert!(codes.contains(&DiagnosticCode::MissingHashToken), "{codes:?}");
    assert!(codes.contains(&DiagnosticCode::MissingTripleBacktick), "{codes:?}");
}

#[test]
fn malformed_fixture_reports_diagnostics() {
    let source = read_fixture("malformed");
    assert!(!parse(&source).diagnostics().is_empty());
}
