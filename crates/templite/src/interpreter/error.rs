//! Error types for the render runtime.

use strsim::levenshtein;
use thiserror::Error;

/// An error that occurred while rendering a compiled template.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A free variable is absent from the render context.
    #[error("undefined variable '{name}'{}", did_you_mean(.suggestions))]
    UndefinedVariable {
        name: String,
        suggestions: Vec<String>,
    },

    /// A loop variable was read before any iteration bound it.
    #[error("loop variable '{name}' is not bound here")]
    UnboundVariable { name: String },

    /// Neither attribute nor keyed access found `key`.
    #[error("cannot resolve '.{key}' on {type_name}")]
    DotResolution { key: String, type_name: String },

    /// A filter name resolved to something that cannot be called.
    #[error("'{name}' is not callable (found {type_name})")]
    NotCallable { name: String, type_name: String },

    /// `{% for %}` over a value with no elements to yield.
    #[error("cannot iterate over {type_name}")]
    NotIterable { type_name: String },

    /// A function was called with the wrong number of arguments.
    #[error("function '{function}' expects {expected} argument(s), got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    /// A host function reported a failure.
    #[error("function '{function}' failed: {message}")]
    Function { function: String, message: String },
}

impl RenderError {
    /// Build the error a host function returns when it cannot handle its input.
    pub fn function(function: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError::Function {
            function: function.into(),
            message: message.into(),
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Names from `available` close enough to `name` to be likely typos.
///
/// Returns at most three names, closest first. Short names (three characters
/// or fewer) only match at distance 1.
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, &str)> = available
        .into_iter()
        .filter(|candidate| *candidate != name)
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
