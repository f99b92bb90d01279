//! First compiler pass: tag validation, block nesting and name discovery.
//!
//! Walks the token stream once, compiling every expression and checking every
//! tag against the open-block stack. The output is a flat event list plus the
//! complete variable sets, which the second pass needs before it can emit the
//! bind prefix of the program.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::parser::{Expr, SyntaxError, Token, TokenKind, VariableSets, compile_expression};

/// The kind of an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    For,
}

impl BlockKind {
    /// The keyword that opens this block, and the suffix of its `end` tag.
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::For => "for",
        }
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Blocks awaiting their `end` tag, innermost last.
///
/// Each entry is one of two states, awaiting `endif` or awaiting `endfor`,
/// together with the offset of the tag that opened it.
#[derive(Debug, Default)]
pub struct BlockStack {
    open: Vec<(BlockKind, usize)>,
}

impl BlockStack {
    pub fn push(&mut self, kind: BlockKind, offset: usize) {
        self.open.push((kind, offset));
    }

    /// Close the innermost block with an `end{suffix}` tag.
    pub fn close(&mut self, suffix: &str, token: &Token) -> Result<BlockKind, SyntaxError> {
        let Some((open, _)) = self.open.pop() else {
            return Err(SyntaxError::TooManyEnds {
                tag: token.text.clone(),
                offset: token.offset,
            });
        };
        if open.as_str() != suffix {
            return Err(SyntaxError::MismatchedEnd {
                open: open.to_string(),
                found: format!("end{suffix}"),
                offset: token.offset,
            });
        }
        Ok(open)
    }

    /// Fail if any block is still open, reporting the innermost.
    pub fn finish(&self) -> Result<(), SyntaxError> {
        match self.open.last() {
            Some((kind, offset)) => Err(SyntaxError::UnmatchedOpen {
                kind: kind.to_string(),
                offset: *offset,
            }),
            None => Ok(()),
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

/// A structural event recorded by the first pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Literal text to output.
    Literal(String),
    /// An expression whose value is output.
    Print(Expr),
    /// `{% if condition %}`
    OpenIf(Expr),
    /// `{% for name in iterable %}`
    OpenFor { name: String, iterable: Expr },
    /// Any valid `{% end... %}`
    Close,
}

/// Output of the first pass.
#[derive(Debug, Default)]
pub struct Analysis {
    pub events: Vec<Event>,
    pub names: VariableSets,
}

/// Validate a token stream and discover every name it references.
pub fn analyze(tokens: &[Token]) -> Result<Analysis, SyntaxError> {
    let mut analysis = Analysis::default();
    let mut stack = BlockStack::default();

    for token in tokens {
        match token.kind {
            TokenKind::Literal => {
                analysis.events.push(Event::Literal(token.text.clone()));
            }
            TokenKind::Expression => {
                let expr = compile_expression(token.body(), token.offset, &mut analysis.names)?;
                analysis.events.push(Event::Print(expr));
            }
            TokenKind::Tag => {
                let event = analyze_tag(token, &mut stack, &mut analysis.names)?;
                analysis.events.push(event);
            }
            TokenKind::Comment => {}
        }
    }

    stack.finish()?;
    Ok(analysis)
}

/// Dispatch a tag on its first word.
fn analyze_tag(
    token: &Token,
    stack: &mut BlockStack,
    names: &mut VariableSets,
) -> Result<Event, SyntaxError> {
    let words: Vec<&str> = token.body().split_whitespace().collect();
    let offset = token.offset;

    match words.as_slice() {
        ["if", condition] => {
            let condition = compile_expression(condition, offset, names)?;
            stack.push(BlockKind::If, offset);
            Ok(Event::OpenIf(condition))
        }
        ["if", ..] => Err(SyntaxError::MalformedIf {
            tag: token.text.clone(),
            offset,
        }),
        ["for", name, "in", iterable] => {
            names.bind_loop(name, offset)?;
            let iterable = compile_expression(iterable, offset, names)?;
            stack.push(BlockKind::For, offset);
            Ok(Event::OpenFor {
                name: (*name).to_string(),
                iterable,
            })
        }
        ["for", ..] => Err(SyntaxError::MalformedFor {
            tag: token.text.clone(),
            offset,
        }),
        [end] if end.starts_with("end") => {
            stack.close(end.get("end".len()..).unwrap_or_default(), token)?;
            Ok(Event::Close)
        }
        [end, ..] if end.starts_with("end") => Err(SyntaxError::MalformedEnd {
            tag: token.text.clone(),
            offset,
        }),
        [word, ..] => Err(SyntaxError::UnrecognizedTag {
            word: (*word).to_string(),
            offset,
        }),
        [] => Err(SyntaxError::UnrecognizedTag {
            word: String::new(),
            offset,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end_token(text: &str) -> Token {
        Token {
            kind: TokenKind::Tag,
            text: text.to_string(),
            offset: 7,
        }
    }

    #[test]
    fn test_stack_closes_innermost_first() {
        let mut stack = BlockStack::default();
        stack.push(BlockKind::If, 0);
        stack.push(BlockKind::For, 3);
        assert_eq!(stack.depth(), 2);
        assert_eq!(
            stack.close("for", &end_token("{% endfor %}")),
            Ok(BlockKind::For)
        );
        assert_eq!(
            stack.close("if", &end_token("{% endif %}")),
            Ok(BlockKind::If)
        );
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.finish(), Ok(()));
    }

    #[test]
    fn test_stack_rejects_close_when_empty() {
        let mut stack = BlockStack::default();
        let err = stack.close("if", &end_token("{% endif %}")).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::TooManyEnds {
                tag: "{% endif %}".to_string(),
                offset: 7,
            }
        );
    }

    #[test]
    fn test_stack_rejects_wrong_kind() {
        let mut stack = BlockStack::default();
        stack.push(BlockKind::If, 0);
        let err = stack.close("for", &end_token("{% endfor %}")).unwrap_err();
        assert_eq!(
            err,
            SyntaxError::MismatchedEnd {
                open: "if".to_string(),
                found: "endfor".to_string(),
                offset: 7,
            }
        );
    }

    #[test]
    fn test_finish_reports_innermost_open_block() {
        let mut stack = BlockStack::default();
        stack.push(BlockKind::For, 0);
        stack.push(BlockKind::If, 12);
        assert_eq!(
            stack.finish(),
            Err(SyntaxError::UnmatchedOpen {
                kind: "if".to_string(),
                offset: 12,
            })
        );
    }
}
