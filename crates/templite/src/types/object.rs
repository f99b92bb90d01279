use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use bon::Builder;

use super::Value;

/// Adapter that lets a host type take part in dot-chain resolution.
///
/// For each key in `value.key`, the runtime first asks [`Object::attribute`].
/// Only if that returns `None` does it fall back to [`Object::item`]; a
/// `None` from `item` fails the render.
pub trait Object: Debug + Send + Sync {
    /// A short name for error messages.
    fn type_name(&self) -> &str;

    /// Property-style access.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Keyed access, tried when [`Object::attribute`] has nothing.
    fn item(&self, key: &str) -> Option<Value> {
        let _ = key;
        None
    }

    /// Elements bound by `{% for %}`, or `None` if the object is not iterable.
    fn iterate(&self) -> Option<Vec<Value>> {
        None
    }

    fn is_truthy(&self) -> bool {
        true
    }

    /// How `{{ }}` prints the object.
    fn render(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "<{}>", self.type_name())
    }
}

/// A named bag of attributes, the simplest [`Object`].
///
/// Unlike a [`Value::Map`], whose entries are reached through keyed access,
/// a record exposes its entries as attributes.
///
/// # Example
///
/// ```
/// use templite::{Record, Value};
///
/// let user = Record::builder()
///     .type_name("User")
///     .build()
///     .with("name", "Ann");
///
/// let value = Value::from(user);
/// assert_eq!(value.type_name(), "User");
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct Record {
    /// Name reported by [`Object::type_name`].
    #[builder(into)]
    pub type_name: String,

    /// Attribute name to value mapping.
    #[builder(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl Record {
    /// Add or replace an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl Object for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }
}
