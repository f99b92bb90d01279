//! Integration tests for the template tokenizer.

use templite::parser::{Token, TokenKind, tokenize};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_empty_template() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_pure_literal() {
    let tokens = tokenize("Hello, world!");
    assert_eq!(
        tokens,
        vec![Token {
            kind: TokenKind::Literal,
            text: "Hello, world!".into(),
            offset: 0,
        }]
    );
}

#[test]
fn test_expression_between_literals() {
    let tokens = tokenize("Hello {{ name }}!");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Literal, TokenKind::Expression, TokenKind::Literal]
    );
    assert_eq!(texts(&tokens), vec!["Hello ", "{{ name }}", "!"]);
    let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
    assert_eq!(offsets, vec![0, 6, 16]);
}

#[test]
fn test_tags_are_classified() {
    let tokens = tokenize("{% if x %}yes{% endif %}");
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Tag, TokenKind::Literal, TokenKind::Tag]
    );
}

#[test]
fn test_adjacent_spans_match_nearest_close() {
    let tokens = tokenize("{{ a }}{{ b }}");
    assert_eq!(texts(&tokens), vec!["{{ a }}", "{{ b }}"]);
}

#[test]
fn test_spans_may_contain_newlines() {
    let tokens = tokenize("{% for x\n in xs %}");
    assert_eq!(kinds(&tokens), vec![TokenKind::Tag]);
    assert_eq!(tokens[0].body(), "for x\n in xs");
}

// =============================================================================
// Comments and literal preservation
// =============================================================================

#[test]
fn test_comments_are_dropped() {
    let tokens = tokenize("a{# note #}b");
    assert_eq!(texts(&tokens), vec!["a", "b"]);
    assert_eq!(tokens[1].offset, 11);
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
}

#[test]
fn test_comment_only_template() {
    assert!(tokenize("{# nothing to see #}").is_empty());
}

#[test]
fn test_whitespace_and_newlines_preserved() {
    let text = "  line one\n\tline two  \n";
    let tokens = tokenize(text);
    assert_eq!(texts(&tokens), vec![text]);
}

#[test]
fn test_unclosed_opener_is_literal() {
    let tokens = tokenize("a {{ b");
    assert_eq!(texts(&tokens), vec!["a {{ b"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Literal]);
}

#[test]
fn test_single_braces_are_literal() {
    let tokens = tokenize("fn main() { body }");
    assert_eq!(texts(&tokens), vec!["fn main() { body }"]);
}

#[test]
fn test_opener_without_close_then_tag() {
    let tokens = tokenize("{{% if a %}");
    assert_eq!(texts(&tokens), vec!["{", "{% if a %}"]);
    assert_eq!(kinds(&tokens), vec![TokenKind::Literal, TokenKind::Tag]);
}

// =============================================================================
// Token bodies
// =============================================================================

#[test]
fn test_body_trims_inside_delimiters() {
    let tokens = tokenize("{{   name   }}");
    assert_eq!(tokens[0].body(), "name");
}

#[test]
fn test_literal_body_is_unchanged() {
    let tokens = tokenize("  spaced  ");
    assert_eq!(tokens[0].body(), "  spaced  ");
}

#[test]
fn test_empty_expression_body() {
    let tokens = tokenize("{{}}");
    assert_eq!(kinds(&tokens), vec![TokenKind::Expression]);
    assert_eq!(tokens[0].body(), "");
}
