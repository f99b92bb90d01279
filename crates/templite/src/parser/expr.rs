//! Expression compiler.
//!
//! Turns the text of a `{{ }}` expression, an `if` condition or a `for`
//! iterable into an [`Expr`], registering every name it touches.
//!
//! Precedence is `|` lowest and `.` highest: `a.b|f|g` is `g(f(a.b))`.

use std::collections::BTreeSet;

use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use super::ast::Expr;
use super::error::SyntaxError;

/// Names collected while compiling a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSets {
    /// Every variable and filter name referenced by an expression.
    pub referenced: BTreeSet<String>,
    /// Names bound by `for NAME in ...`.
    pub loop_bound: BTreeSet<String>,
}

impl VariableSets {
    /// Validate `name` and record it as referenced.
    pub fn reference(&mut self, name: &str, offset: usize) -> Result<(), SyntaxError> {
        validate_identifier(name, offset)?;
        self.referenced.insert(name.to_string());
        Ok(())
    }

    /// Validate `name` and record it as bound by a loop.
    pub fn bind_loop(&mut self, name: &str, offset: usize) -> Result<(), SyntaxError> {
        validate_identifier(name, offset)?;
        self.loop_bound.insert(name.to_string());
        Ok(())
    }

    /// Names that must come from the render context, sorted.
    ///
    /// A name bound by any loop is never free, wherever else it appears.
    pub fn free(&self) -> impl Iterator<Item = &str> {
        self.referenced
            .difference(&self.loop_bound)
            .map(String::as_str)
    }
}

/// Compile a single expression.
///
/// `offset` is the byte offset of the enclosing token and is only used for
/// error reporting.
pub fn compile_expression(
    text: &str,
    offset: usize,
    names: &mut VariableSets,
) -> Result<Expr, SyntaxError> {
    let text = text.trim();

    if let Some((head, filters)) = text.split_once('|') {
        let mut compiled = compile_expression(head, offset, names)?;
        for filter in filters.split('|') {
            let filter = filter.trim();
            names.reference(filter, offset)?;
            compiled = Expr::Filter {
                filter: filter.to_string(),
                input: Box::new(compiled),
            };
        }
        Ok(compiled)
    } else if let Some((head, keys)) = text.split_once('.') {
        let base = compile_expression(head, offset, names)?;
        Ok(Expr::Dots {
            base: Box::new(base),
            keys: keys.split('.').map(|k| k.trim().to_string()).collect(),
        })
    } else {
        names.reference(text, offset)?;
        Ok(Expr::Variable(text.to_string()))
    }
}

/// Check that `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut input = name;
    identifier(&mut input).is_ok() && input.is_empty()
}

fn validate_identifier(name: &str, offset: usize) -> Result<(), SyntaxError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(SyntaxError::InvalidIdentifier {
            name: name.to_string(),
            offset,
        })
    }
}

/// Parse an identifier.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (one_of(is_ident_start), take_while(0.., is_ident_cont))
        .take()
        .parse_next(input)
}

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
