//! Public syntax types for templite templates.
//!
//! These types are public so external tooling can inspect what a template
//! references without rendering it.

/// The classification of a span of template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Text outside any delimiters, kept byte for byte.
    Literal,
    /// `{{ expr }}`
    Expression,
    /// `{% tag %}`
    Tag,
    /// `{# comment #}`
    Comment,
}

/// A classified span of template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw span, delimiters included.
    pub text: String,
    /// Byte offset of the span within the template source.
    pub offset: usize,
}

impl Token {
    /// The text between the delimiters with surrounding whitespace removed.
    ///
    /// Literal tokens return their text unchanged.
    pub fn body(&self) -> &str {
        match self.kind {
            TokenKind::Literal => &self.text,
            TokenKind::Expression | TokenKind::Tag | TokenKind::Comment => self
                .text
                .get(2..self.text.len().saturating_sub(2))
                .unwrap_or_default()
                .trim(),
        }
    }
}

/// A compiled expression, before names are assigned slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare variable reference: `name`
    Variable(String),
    /// An attribute/item chain: `base.key.key`
    ///
    /// Keys are opaque; they are not validated as identifiers.
    Dots { base: Box<Expr>, keys: Vec<String> },
    /// A filter applied to the result of `input`: `input|filter`
    Filter { filter: String, input: Box<Expr> },
}
