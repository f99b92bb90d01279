//! Template tokenizer using winnow.
//!
//! Splits template text into literal text, `{{ }}` expressions, `{% %}` tags
//! and `{# #}` comments. Each delimited span ends at the nearest closing
//! delimiter and may contain newlines. An opening delimiter with no closing
//! delimiter after it is ordinary literal text.

use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{any, take_till, take_until};

use super::ast::{Token, TokenKind};

/// Split a template into classified tokens.
///
/// Comments are classified and dropped here, so they never reach the
/// compiler. Literal text is preserved exactly, and empty literals are never
/// produced.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut remaining = text;
    let mut offset = 0;
    let mut extends_literal = false;

    while let Ok((kind, raw)) = span(&mut remaining) {
        let start = offset;
        offset += raw.len();

        match kind {
            TokenKind::Comment => {
                extends_literal = false;
            }
            TokenKind::Literal if extends_literal => {
                if let Some(last) = tokens.last_mut() {
                    last.text.push_str(raw);
                }
            }
            TokenKind::Literal | TokenKind::Expression | TokenKind::Tag => {
                extends_literal = kind == TokenKind::Literal;
                tokens.push(Token {
                    kind,
                    text: raw.to_string(),
                    offset: start,
                });
            }
        }
    }

    tokens
}

/// Parse one span: a delimited token, a run of text, or a lone `{`.
fn span<'i>(input: &mut &'i str) -> ModalResult<(TokenKind, &'i str)> {
    alt((
        expression.map(|s| (TokenKind::Expression, s)),
        tag.map(|s| (TokenKind::Tag, s)),
        comment.map(|s| (TokenKind::Comment, s)),
        take_till(1.., '{').map(|s| (TokenKind::Literal, s)),
        any.take().map(|s| (TokenKind::Literal, s)),
    ))
    .parse_next(input)
}

/// Parse `{{ ... }}`.
fn expression<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    ("{{", take_until(0.., "}}"), "}}").take().parse_next(input)
}

/// Parse `{% ... %}`.
fn tag<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    ("{%", take_until(0.., "%}"), "%}").take().parse_next(input)
}

/// Parse `{# ... #}`.
fn comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    ("{#", take_until(0.., "#}"), "#}").take().parse_next(input)
}
