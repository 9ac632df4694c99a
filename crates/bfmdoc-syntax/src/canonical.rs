//! Canonical renderings of a parse result.
//!
//! Two renderings are provided. [`to_json`] produces a stable JSON value for
//! comparing trees across runs and tools. [`debug_tree`] produces an indented
//! text dump in the style used by snapshot tests.
//!
//! In both, a token that the parser synthesized is recognised by its empty
//! text together with the missing-token diagnostic for its kind.

use std::collections::BTreeMap;

use rowan::NodeOrToken;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::diagnostics::{DiagnosticCode, LocatedDiagnostic};
use crate::parser::Parse;
use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

#[derive(Serialize)]
struct DiagnosticJson<'a> {
    code: &'static str,
    message: String,
    args: &'a [String],
}

impl<'a> From<&'a LocatedDiagnostic> for DiagnosticJson<'a> {
    fn from(located: &'a LocatedDiagnostic) -> Self {
        Self {
            code: located.diagnostic.code.id(),
            message: located.diagnostic.message(),
            args: &located.diagnostic.args,
        }
    }
}

type ByToken<'a> = BTreeMap<usize, Vec<&'a LocatedDiagnostic>>;

fn diagnostics_by_token(parse: &Parse) -> ByToken<'_> {
    let mut map: ByToken<'_> = BTreeMap::new();
    for located in parse.diagnostics() {
        map.entry(located.token).or_default().push(located);
    }
    map
}

fn is_missing(token: &SyntaxToken, attached: &[&LocatedDiagnostic]) -> bool {
    let kind = token.kind();
    token.text().is_empty()
        && kind != SyntaxKind::EOF
        && attached
            .iter()
            .any(|d| d.diagnostic.code == DiagnosticCode::for_missing(kind))
}

/// Render the tree as JSON.
///
/// Nodes are `{"kind", "children"}`. Tokens are `{"kind", "text"}` plus
/// `"isMissing": true` for synthesized tokens and a `"diagnostics"` array
/// when any are attached. Trivia never carries diagnostics.
pub fn to_json(parse: &Parse) -> Value {
    let diagnostics = diagnostics_by_token(parse);
    let mut ordinal = 0;
    node_json(&parse.syntax(), &diagnostics, &mut ordinal)
}

fn node_json(node: &SyntaxNode, diagnostics: &ByToken<'_>, ordinal: &mut usize) -> Value {
    let mut children = Vec::new();
    for child in node.children_with_tokens() {
        let value = match child {
            NodeOrToken::Node(n) => node_json(&n, diagnostics, ordinal),
            NodeOrToken::Token(t) => token_json(&t, diagnostics, ordinal),
        };
        children.push(value);
    }
    json!({
        "kind": format!("{:?}", node.kind()),
        "children": children,
    })
}

fn token_json(token: &SyntaxToken, diagnostics: &ByToken<'_>, ordinal: &mut usize) -> Value {
    let mut object = Map::new();
    object.insert("kind".into(), json!(format!("{:?}", token.kind())));
    object.insert("text".into(), json!(token.text()));
    if token.kind().is_trivia() {
        return Value::Object(object);
    }

    let attached = diagnostics.get(&*ordinal).map(Vec::as_slice).unwrap_or_default();
    *ordinal += 1;

    if is_missing(token, attached) {
        object.insert("isMissing".into(), json!(true));
    }
    if !attached.is_empty() {
        let rendered: Vec<DiagnosticJson<'_>> =
            attached.iter().map(|d| DiagnosticJson::from(*d)).collect();
        object.insert("diagnostics".into(), json!(rendered));
    }
    Value::Object(object)
}

/// Render the tree as indented text, one node or token per line.
///
/// Diagnostics follow the token they are attached to, prefixed with `!`.
pub fn debug_tree(parse: &Parse) -> String {
    let diagnostics = diagnostics_by_token(parse);
    let mut ordinal = 0;
    let mut out = String::new();
    write_node(&mut out, &parse.syntax(), 0, &diagnostics, &mut ordinal);
    out
}

fn write_node(
    out: &mut String,
    node: &SyntaxNode,
    indent: usize,
    diagnostics: &ByToken<'_>,
    ordinal: &mut usize,
) {
    let prefix = "  ".repeat(indent);
    out.push_str(&format!("{}{:?}@{:?}\n", prefix, node.kind(), node.text_range()));

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => write_node(out, &n, indent + 1, diagnostics, ordinal),
            NodeOrToken::Token(t) => {
                out.push_str(&format!(
                    "{}  {:?}@{:?} {:?}\n",
                    prefix,
                    t.kind(),
                    t.text_range(),
                    t.text()
                ));
                if t.kind().is_trivia() {
                    continue;
                }
                let attached = diagnostics.get(&*ordinal).map(Vec::as_slice).unwrap_or_default();
                *ordinal += 1;
                if is_missing(&t, attached) {
                    out.push_str(&format!("{prefix}    (missing)\n"));
                }
                for located in attached {
                    out.push_str(&format!(
                        "{}    ! {} {}\n",
                        prefix,
                        located.diagnostic.code.id(),
                        located.diagnostic.message()
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshot_description_line() {
        assert_snapshot!(parse("# Description").debug_tree(), @r##"
        DOCUMENTATION@0..13
          DESCRIPTION_LINE@0..13
            HASH@0..1 "#"
            WHITESPACE@1..2 " "
            DOCUMENTATION_DESCRIPTION@2..13 "Description"
          EOF@13..13 ""
        "##);
    }

    #[test]
    fn debug_tree_shows_missing_tokens() {
        let tree = parse("# x ``````").debug_tree();
        assert!(tree.contains("(missing)"), "{tree}");
        assert!(tree.contains("! BFM1011 missing code reference"), "{tree}");
    }

    #[test]
    fn json_of_description_line() {
        let value = parse("# Description").to_json();
        assert_eq!(
            value,
            json!({
                "kind": "DOCUMENTATION",
                "children": [
                    {
                        "kind": "DESCRIPTION_LINE",
                        "children": [
                            {"kind": "HASH", "text": "#"},
                            {"kind": "WHITESPACE", "text": " "},
                            {"kind": "DOCUMENTATION_DESCRIPTION", "text": "Description"},
                        ]
                    },
                    {"kind": "EOF", "text": ""},
                ]
            })
        );
    }

    fn find_missing(value: &Value, found: &mut Vec<Value>) {
        if value.get("isMissing").is_some() {
            found.push(value.clone());
        }
        if let Some(children) = value.get("children").and_then(Value::as_array) {
            for child in children {
                find_missing(child, found);
            }
        }
    }

    #[test]
    fn json_marks_missing_tokens() {
        let value = parse("# x ``````").to_json();
        let mut missing = Vec::new();
        find_missing(&value, &mut missing);

        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0]["kind"], "CODE_CONTENT");
        assert_eq!(missing[0]["text"], "");
        assert_eq!(missing[0]["diagnostics"][0]["code"], "BFM1011");
        assert_eq!(missing[0]["diagnostics"][0]["args"], json!([]));
    }

    #[test]
    fn eof_is_never_missing() {
        let value = parse("").to_json();
        let mut missing = Vec::new();
        find_missing(&value, &mut missing);
        assert!(missing.is_empty());
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = "# See `x.y()`\n# + a - b\n# ```\n# c\n# ```";
        assert_eq!(parse(input).to_json(), parse(input).to_json());
        assert_eq!(parse(input).debug_tree(), parse(input).debug_tree());
    }
}
