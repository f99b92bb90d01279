//! templite: a small compiled text-template engine.
//!
//! Templates interleave literal text with `{{ expr }}` substitutions,
//! `{% if %}`/`{% for %}` blocks closed by `{% endif %}`/`{% endfor %}`, and
//! `{# comments #}`. A template is compiled once into a [`Template`] and can
//! then be rendered any number of times against different contexts.

pub mod compiler;
pub mod interpreter;
pub mod parser;
mod template;
pub mod types;

pub use interpreter::{RenderError, standard_filters};
pub use parser::{LoadError, SyntaxError};
pub use template::{Template, Variables};
pub use types::{Context, Function, Object, Record, Value};

/// Compile `text`, merging `contexts` in order into the base context.
///
/// Shorthand for [`Template::with_contexts`].
pub fn compile(
    text: &str,
    contexts: impl IntoIterator<Item = Context>,
) -> Result<Template, SyntaxError> {
    Template::with_contexts(text, contexts)
}

/// Creates a [`Context`] from name-value pairs.
///
/// Values are converted via `Into<Value>`, so you can pass integers, floats,
/// strings, vectors, records or functions directly.
///
/// # Example
///
/// ```
/// use templite::{Value, context};
///
/// let c = context! { "count" => 3, "name" => "Alice" };
/// assert_eq!(c.len(), 2);
/// assert_eq!(c.get("count").and_then(Value::as_number), Some(3));
/// assert_eq!(c.get("name").and_then(Value::as_string), Some("Alice"));
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        $crate::Context::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut context = $crate::Context::new();
            $(
                context.insert($key, $value);
            )+
            context
        }
    };
}
