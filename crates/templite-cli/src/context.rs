//! Building render contexts from command-line input.
//!
//! Layers, later winning: the standard filters, a JSON context file, then
//! `-p name=value` parameters.

use std::fs::read_to_string;
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde_json::Value as JsonValue;
use templite::{standard_filters, Context, Value};
use thiserror::Error;

/// Failures while loading a JSON context file.
#[derive(Debug, Error, Diagnostic)]
pub enum ContextError {
    #[error("cannot read context file {}", path.display())]
    #[diagnostic(code(templite::context::io))]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("invalid JSON in context file {}", path.display())]
    #[diagnostic(code(templite::context::json))]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("context file {} must hold a JSON object", path.display())]
    #[diagnostic(
        code(templite::context::shape),
        help("wrap the values in {{ \"name\": value, ... }}")
    )]
    NotAnObject { path: PathBuf },
}

/// Parse a name=value parameter string.
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((name.to_string(), value.to_string()))
}

/// Parameters that parse as integers become numbers, anything else a string.
pub fn param_value(raw: String) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(raw),
    }
}

/// Convert parsed JSON into a template value.
pub fn from_json(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::None,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(i),
            None => n.as_f64().map_or(Value::None, Value::Float),
        },
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(items) => Value::List(items.into_iter().map(from_json).collect()),
        JsonValue::Object(map) => {
            Value::Map(map.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}

/// Read a JSON object from `path` as a context.
pub fn load_context(path: &Path) -> Result<Context, ContextError> {
    let content = read_to_string(path).map_err(|source| ContextError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let json: JsonValue = serde_json::from_str(&content).map_err(|source| ContextError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let JsonValue::Object(map) = json else {
        return Err(ContextError::NotAnObject {
            path: path.to_path_buf(),
        });
    };
    Ok(map.into_iter().map(|(k, v)| (k, from_json(v))).collect())
}

/// Layer the standard filters, an optional context file and parameters.
pub fn build_context(
    filters: bool,
    file: Option<&Path>,
    params: Vec<(String, String)>,
) -> Result<Context, ContextError> {
    let mut context = if filters {
        standard_filters()
    } else {
        Context::new()
    };
    if let Some(path) = file {
        context.merge(load_context(path)?);
    }
    context.extend(params.into_iter().map(|(k, v)| (k, param_value(v))));
    Ok(context)
}
