//! Miette diagnostic wrapper for template syntax errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use templite::SyntaxError;
use thiserror::Error;

/// A miette-compatible diagnostic for a template that failed to compile.
///
/// Fields are read by the miette derive, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(templite::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a SyntaxError with source context.
    pub fn from_syntax_error(name: &str, content: &str, err: &SyntaxError) -> Self {
        let offset = err.offset().min(content.len());
        TemplateDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, token_len(content, offset)).into(),
            message: err.to_string(),
            help: help_for(err),
        }
    }
}

/// Length of the `{{ }}` or `{% %}` span starting at `offset`, or 1 when the
/// text there is not a delimited span.
fn token_len(content: &str, offset: usize) -> usize {
    let rest = content.get(offset..).unwrap_or_default();
    let close = if rest.starts_with("{{") {
        "}}"
    } else if rest.starts_with("{%") {
        "%}"
    } else {
        return usize::from(!rest.is_empty());
    };
    rest.find(close).map_or(rest.len(), |end| end + close.len())
}

fn help_for(err: &SyntaxError) -> Option<String> {
    match err {
        SyntaxError::MalformedIf { .. } => Some("expected {% if CONDITION %}".into()),
        SyntaxError::MalformedFor { .. } => Some("expected {% for NAME in EXPRESSION %}".into()),
        SyntaxError::MismatchedEnd { open, .. } => Some(format!("expected {{% end{open} %}}")),
        SyntaxError::UnmatchedOpen { kind, .. } => {
            Some(format!("add a matching {{% end{kind} %}}"))
        }
        SyntaxError::UnrecognizedTag { .. } => {
            Some("known tags are if, for, endif and endfor".into())
        }
        SyntaxError::InvalidIdentifier { .. } => Some(
            "names start with a letter or underscore, followed by letters, digits or underscores"
                .into(),
        ),
        SyntaxError::MalformedEnd { .. } | SyntaxError::TooManyEnds { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_len_covers_delimited_span() {
        let text = "ok {% if a b %} rest";
        assert_eq!(token_len(text, 3), "{% if a b %}".len());
        assert_eq!(token_len("{{ 1bad }}", 0), 10);
    }

    #[test]
    fn test_token_len_outside_span() {
        assert_eq!(token_len("abc", 1), 1);
        assert_eq!(token_len("abc", 3), 0);
        assert_eq!(token_len("{{ open", 0), 7);
    }

    #[test]
    fn test_help_names_expected_end() {
        let err = SyntaxError::MismatchedEnd {
            open: "if".into(),
            found: "endfor".into(),
            offset: 0,
        };
        assert_eq!(help_for(&err).as_deref(), Some("expected {% endif %}"));
    }
}
