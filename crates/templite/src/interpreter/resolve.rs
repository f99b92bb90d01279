//! Dot-chain resolution.
//!
//! `base.k1.k2` resolves each key in turn. A key is first tried as an
//! attribute; only if the value has no such attribute is it tried as an item
//! (map key or list index). A missing attribute is recoverable, a missing
//! item fails the render. After each key, a [`Function`] result is called
//! with no arguments and its return value replaces it.
//!
//! [`Function`]: crate::types::Function

use crate::interpreter::RenderError;
use crate::types::Value;

/// Resolve `keys` against `value` from left to right.
pub fn resolve_dots(mut value: Value, keys: &[String]) -> Result<Value, RenderError> {
    for key in keys {
        value = match value.attribute(key) {
            Some(attribute) => attribute,
            None => value.item(key)?,
        };
        if let Value::Function(function) = &value {
            value = function.call(&[])?;
        }
    }
    Ok(value)
}

impl Value {
    /// Property-style access.
    ///
    /// Strings, lists and maps expose a few read-only properties. A map's
    /// `keys`, `values` and `items` shadow entries of the same name, but a
    /// stored `len` entry wins over the map's size.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match (self, name) {
            (Value::String(s), "len") => Some(s.chars().count().into()),
            (Value::String(s), "upper") => Some(s.to_uppercase().into()),
            (Value::String(s), "lower") => Some(s.to_lowercase().into()),
            (Value::String(s), "trim") => Some(s.trim().into()),
            (Value::List(items), "len") => Some(items.len().into()),
            (Value::List(items), "first") => Some(items.first().cloned().into()),
            (Value::List(items), "last") => Some(items.last().cloned().into()),
            (Value::Map(map), "len") if !map.contains_key("len") => Some(map.len().into()),
            (Value::Map(map), "keys") => Some(Value::List(
                map.keys().cloned().map(Value::String).collect(),
            )),
            (Value::Map(map), "values") => Some(Value::List(map.values().cloned().collect())),
            (Value::Map(map), "items") => Some(Value::List(
                map.iter()
                    .map(|(k, v)| Value::List(vec![Value::String(k.clone()), v.clone()]))
                    .collect(),
            )),
            (Value::Object(object), _) => object.attribute(name),
            _ => None,
        }
    }

    /// Keyed or indexed access.
    ///
    /// Maps are indexed by key and lists by a non-negative integer key.
    pub fn item(&self, key: &str) -> Result<Value, RenderError> {
        let found = match self {
            Value::Map(map) => map.get(key).cloned(),
            Value::List(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index))
                .cloned(),
            Value::Object(object) => object.item(key),
            Value::None
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Function(_) => None,
        };
        found.ok_or_else(|| RenderError::DotResolution {
            key: key.to_string(),
            type_name: self.type_name().to_string(),
        })
    }
}
