//! Render runtime for compiled templates.
//!
//! This module executes a compiled program against a merged context. It binds
//! free variables, runs conditionals and loops, resolves dot chains and calls
//! filters.

mod context;
mod error;
mod evaluator;
mod filters;
mod frame;
mod resolve;

pub(crate) use context::RenderContext;
pub use error::{RenderError, compute_suggestions};
pub(crate) use evaluator::execute;
pub use filters::standard_filters;
