//! Template tokenizer and expression compiler.
//!
//! This module turns raw template text into classified tokens and compiles
//! the expressions inside them. The resulting types are public so tooling can
//! inspect templates without rendering them.

pub mod ast;
pub mod error;
mod expr;
mod token;

pub use ast::*;
pub use error::{LoadError, SyntaxError};
pub use expr::{VariableSets, compile_expression, is_identifier};
pub use token::tokenize;
