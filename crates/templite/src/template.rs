//! Compiled templates.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::compiler::{Program, analyze, emit};
use crate::interpreter::{RenderContext, RenderError, execute};
use crate::parser::{LoadError, SyntaxError, VariableSets, tokenize};
use crate::types::Context;

/// A compiled template, ready to render any number of times.
///
/// Compilation either fully succeeds or fails with a [`SyntaxError`]. The
/// result is immutable: rendering never changes it, so one template can be
/// shared across threads and rendered concurrently.
///
/// # Example
///
/// ```
/// use templite::{Template, context};
///
/// let template = Template::new("{% for i in items %}{{ i }}{% endfor %}").unwrap();
/// let output = template.render(&context! { "items" => vec![1, 2, 3] }).unwrap();
/// assert_eq!(output, "123");
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    /// Base context, merged from the contexts given at compile time.
    context: Context,
    program: Arc<Program>,
    variables: Variables,
}

/// The names a template references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Variables {
    /// Names that must be supplied by a context, sorted.
    pub free: Vec<String>,
    /// Names bound by `{% for %}` tags, sorted.
    pub loop_bound: Vec<String>,
}

impl From<&VariableSets> for Variables {
    fn from(names: &VariableSets) -> Self {
        Self {
            free: names.free().map(str::to_string).collect(),
            loop_bound: names.loop_bound.iter().cloned().collect(),
        }
    }
}

impl Template {
    /// Compile a template with an empty base context.
    pub fn new(text: &str) -> Result<Self, SyntaxError> {
        Self::with_contexts(text, [])
    }

    /// Compile a template, merging `contexts` in order into its base context.
    ///
    /// Later contexts win on collision.
    pub fn with_contexts(
        text: &str,
        contexts: impl IntoIterator<Item = Context>,
    ) -> Result<Self, SyntaxError> {
        let mut context = Context::new();
        for layer in contexts {
            context.merge(layer);
        }

        let tokens = tokenize(text);
        let analysis = analyze(&tokens)?;
        let variables = Variables::from(&analysis.names);
        let program = emit(analysis);

        debug!(
            tokens = tokens.len(),
            free = variables.free.len(),
            loop_bound = variables.loop_bound.len(),
            instructions = program.len(),
            "compiled template"
        );

        Ok(Self {
            context,
            program: Arc::new(program),
            variables,
        })
    }

    /// Read and compile a template file.
    pub fn from_file(
        path: impl AsRef<Path>,
        contexts: impl IntoIterator<Item = Context>,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_contexts(&text, contexts).map_err(|source| LoadError::Syntax {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render with `overrides` layered over the base context.
    ///
    /// # Errors
    ///
    /// Fails if a free variable is missing from the merged context, or if
    /// evaluation fails (unresolvable dot chain, uncallable filter,
    /// non-iterable loop source, failing host function).
    pub fn render(&self, overrides: &Context) -> Result<String, RenderError> {
        let context = RenderContext::new(&self.context, overrides);
        trace!(names = context.names().len(), "rendering template");
        execute(&self.program, context)
    }

    /// Render with the base context alone.
    pub fn render_default(&self) -> Result<String, RenderError> {
        self.render(&Context::new())
    }

    /// The names this template references.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// The base context captured at compile time.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The compiled program.
    pub fn program(&self) -> &Program {
        &self.program
    }
}
