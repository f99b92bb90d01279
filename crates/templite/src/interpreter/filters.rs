//! Standard filters.
//!
//! Filters are ordinary context entries: `{{ name|upper }}` looks up `upper`
//! like any other variable and calls it with one argument. This module only
//! provides a ready-made set; nothing here is registered implicitly.

use crate::interpreter::RenderError;
use crate::types::{Context, Function, Value};

/// A context holding the standard filters.
///
/// Merge it into a template's base context to make them available:
///
/// ```
/// use templite::{Template, context, standard_filters};
///
/// let template = Template::with_contexts("{{ name|upper }}", [standard_filters()]).unwrap();
/// assert_eq!(template.render(&context! { "name" => "bob" }).unwrap(), "BOB");
/// ```
pub fn standard_filters() -> Context {
    let mut filters = Context::new();
    filters.insert("upper", Function::filter("upper", upper));
    filters.insert("lower", Function::filter("lower", lower));
    filters.insert("capitalize", Function::filter("capitalize", capitalize));
    filters.insert("trim", Function::filter("trim", trim));
    filters.insert("length", Function::filter("length", length));
    filters.insert("reverse", Function::filter("reverse", reverse));
    filters.insert("first", Function::filter("first", first));
    filters.insert("last", Function::filter("last", last));
    filters.insert("join", Function::filter("join", join));
    filters
}

fn upper(value: &Value) -> Result<Value, RenderError> {
    Ok(value.to_string().to_uppercase().into())
}

fn lower(value: &Value) -> Result<Value, RenderError> {
    Ok(value.to_string().to_lowercase().into())
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(value: &Value) -> Result<Value, RenderError> {
    let text = value.to_string();
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    Ok(capitalized.into())
}

fn trim(value: &Value) -> Result<Value, RenderError> {
    Ok(value.to_string().trim().into())
}

fn length(value: &Value) -> Result<Value, RenderError> {
    match value {
        Value::String(s) => Ok(s.chars().count().into()),
        Value::List(items) => Ok(items.len().into()),
        Value::Map(map) => Ok(map.len().into()),
        other => Err(unsupported("length", other)),
    }
}

fn reverse(value: &Value) -> Result<Value, RenderError> {
    match value {
        Value::String(s) => Ok(s.chars().rev().collect::<String>().into()),
        Value::List(items) => Ok(Value::List(items.iter().rev().cloned().collect())),
        other => Err(unsupported("reverse", other)),
    }
}

fn first(value: &Value) -> Result<Value, RenderError> {
    match value {
        Value::String(s) => Ok(s.chars().next().map(String::from).into()),
        Value::List(items) => Ok(items.first().cloned().into()),
        other => Err(unsupported("first", other)),
    }
}

fn last(value: &Value) -> Result<Value, RenderError> {
    match value {
        Value::String(s) => Ok(s.chars().next_back().map(String::from).into()),
        Value::List(items) => Ok(items.last().cloned().into()),
        other => Err(unsupported("last", other)),
    }
}

/// Join list elements with `", "`.
fn join(value: &Value) -> Result<Value, RenderError> {
    match value {
        Value::List(items) => Ok(items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
            .into()),
        other => Err(unsupported("join", other)),
    }
}

fn unsupported(filter: &str, value: &Value) -> RenderError {
    RenderError::function(filter, format!("unsupported value of type {}", value.type_name()))
}
