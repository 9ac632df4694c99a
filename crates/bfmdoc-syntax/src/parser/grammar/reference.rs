//! Backtick references.
//!
//! Single backtick content is either a name reference (`` `foo()` ``,
//! `` type `Person` ``) or plain inline code (`` `a + b` ``). Which one it is
//! depends on the shape of the tokens up to the closing backtick and on how
//! strict the optional keyword in front is:
//!
//! | keyword       | accepted shapes                                   |
//! |---------------|---------------------------------------------------|
//! | none          | `f()`, `m:f()`, `T.f()`, `m:T.f()`                |
//! | `function`    | the above, and `f`, `m:f` without parentheses     |
//! | other         | `x`, `m:x`                                        |
//!
//! The shape is checked with a lookahead scan before anything is consumed.

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

/// How strictly backtick content must look like a named construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceGenre {
    NoKey,
    SpecialKey,
    FunctionKey,
}

impl ReferenceGenre {
    fn of(keyword: Option<SyntaxKind>) -> Self {
        match keyword {
            None => Self::NoKey,
            Some(SyntaxKind::FUNCTION_DOC_REFERENCE) => Self::FunctionKey,
            Some(_) => Self::SpecialKey,
        }
    }
}

/// Parse an optional keyword and a single backtick span.
///
/// Produces a `NAME_REFERENCE` when the content has a name shape or a keyword
/// was given, otherwise `INLINE_CODE`.
pub(super) fn name_or_inline_code(p: &mut Parser<'_>) -> SyntaxKind {
    let m = p.start();
    let keyword = match p.current() {
        kind if kind.is_doc_reference() => {
            p.bump();
            Some(kind)
        }
        _ => None,
    };
    let genre = ReferenceGenre::of(keyword);

    p.expect(SyntaxKind::BACKTICK);
    if is_name_reference(p, genre) {
        name_reference_content(p);
        p.expect(SyntaxKind::BACKTICK);
        m.complete(p, SyntaxKind::NAME_REFERENCE);
        return SyntaxKind::NAME_REFERENCE;
    }

    let len = backtick_expr_len(p);
    if len == 0 {
        p.missing(SyntaxKind::CODE_CONTENT);
    } else {
        let text = merged_text(p, len);
        p.bump_n(len, SyntaxKind::CODE_CONTENT);
        if genre != ReferenceGenre::NoKey {
            p.error(Diagnostic::new(
                DiagnosticCode::InvalidNameReference,
                vec![text],
            ));
        }
    }
    p.expect(SyntaxKind::BACKTICK);

    let kind = match genre {
        ReferenceGenre::NoKey => SyntaxKind::INLINE_CODE,
        _ => SyntaxKind::NAME_REFERENCE,
    };
    m.complete(p, kind);
    kind
}

/// Number of backtick-expression tokens at the cursor.
fn backtick_expr_len(p: &mut Parser<'_>) -> usize {
    let mut len = 0;
    while p.nth(len).is_backtick_expr() {
        len += 1;
    }
    len
}

/// Text of the next `len` tokens as one lexeme, trivia between them included.
fn merged_text(p: &mut Parser<'_>, len: usize) -> String {
    let mut text = String::new();
    for i in 0..len {
        let token = p.nth_token(i);
        if i > 0 {
            token.leading.iter().for_each(|t| text.push_str(&t.text));
        }
        text.push_str(&token.text);
        if i + 1 < len {
            token.trailing.iter().for_each(|t| text.push_str(&t.text));
        }
    }
    text
}

fn is_name_reference(p: &mut Parser<'_>, genre: ReferenceGenre) -> bool {
    let mut lookahead = Lookahead::default();
    let matched = match genre {
        ReferenceGenre::SpecialKey => lookahead.qualified_identifier(p),
        ReferenceGenre::FunctionKey => lookahead.backtick_expr(p, true),
        ReferenceGenre::NoKey => lookahead.backtick_expr(p, false),
    };
    matched && p.nth(lookahead.offset) == SyntaxKind::BACKTICK
}

/// A cursor over unconsumed tokens, local to one scan.
#[derive(Debug, Default)]
struct Lookahead {
    offset: usize,
}

impl Lookahead {
    fn eat(&mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> bool {
        if p.nth(self.offset) == kind {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    /// `ident` or `module:ident`.
    fn qualified_identifier(&mut self, p: &mut Parser<'_>) -> bool {
        if !self.eat(p, SyntaxKind::IDENTIFIER) {
            return false;
        }
        if self.eat(p, SyntaxKind::COLON) {
            return self.eat(p, SyntaxKind::IDENTIFIER);
        }
        true
    }

    /// A qualified identifier followed by `()` or `.method()`.
    fn backtick_expr(&mut self, p: &mut Parser<'_>, parens_optional: bool) -> bool {
        if !self.qualified_identifier(p) {
            return false;
        }
        match p.nth(self.offset) {
            SyntaxKind::OPEN_PAREN => self.call_parens(p),
            SyntaxKind::DOT => {
                self.offset += 1;
                self.eat(p, SyntaxKind::IDENTIFIER) && self.call_parens(p)
            }
            _ => parens_optional,
        }
    }

    fn call_parens(&mut self, p: &mut Parser<'_>) -> bool {
        self.eat(p, SyntaxKind::OPEN_PAREN) && self.eat(p, SyntaxKind::CLOSE_PAREN)
    }
}

/// Parse a shape the lookahead scan has accepted.
fn name_reference_content(p: &mut Parser<'_>) {
    let name = qualified_identifier(p);
    match p.current() {
        SyntaxKind::OPEN_PAREN => {
            let m = name.precede(p);
            call_parens(p);
            m.complete(p, SyntaxKind::FUNCTION_CALL);
        }
        SyntaxKind::DOT => {
            let m = name.precede(p);
            p.bump();
            let method = p.start();
            p.expect(SyntaxKind::IDENTIFIER);
            method.complete(p, SyntaxKind::SIMPLE_NAME_REFERENCE);
            call_parens(p);
            m.complete(p, SyntaxKind::METHOD_CALL);
        }
        kind => debug_assert_eq!(
            kind,
            SyntaxKind::BACKTICK,
            "an accepted name reference ends at a backtick"
        ),
    }
}

fn qualified_identifier(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.expect(SyntaxKind::IDENTIFIER);
    if p.eat(SyntaxKind::COLON) {
        p.expect(SyntaxKind::IDENTIFIER);
        m.complete(p, SyntaxKind::QUALIFIED_NAME_REFERENCE)
    } else {
        m.complete(p, SyntaxKind::SIMPLE_NAME_REFERENCE)
    }
}

fn call_parens(p: &mut Parser<'_>) {
    p.expect(SyntaxKind::OPEN_PAREN);
    p.expect(SyntaxKind::CLOSE_PAREN);
}
