use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use super::Value;
use crate::interpreter::RenderError;

/// Native function signature shared by all host callables.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, RenderError> + Send + Sync;

/// A host callable placed in a template context.
///
/// Functions serve two roles: filters (`{{ name|upper }}` calls `upper` with
/// one argument) and zero-argument callables reached through a dot chain,
/// which are invoked automatically (`{{ user.name }}` where `name` is a
/// [`Function::thunk`]).
///
/// # Example
///
/// ```
/// use templite::{Function, Value};
///
/// let upper = Function::filter("upper", |v| Ok(v.to_string().to_uppercase().into()));
/// let result = upper.call(&[Value::from("bob")]).unwrap();
/// assert_eq!(result.to_string(), "BOB");
/// ```
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl Function {
    /// Create a function taking any number of arguments.
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> Result<Value, RenderError> + Send + Sync + 'static,
    ) -> Self {
        let name: String = name.into();
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Create a function taking exactly one argument, the shape filters use.
    pub fn filter(
        name: impl Into<String>,
        func: impl Fn(&Value) -> Result<Value, RenderError> + Send + Sync + 'static,
    ) -> Self {
        let name: String = name.into();
        let label = name.clone();
        Self::new(name, move |args| match args {
            [value] => func(value),
            _ => Err(RenderError::ArgumentCount {
                function: label.clone(),
                expected: 1,
                got: args.len(),
            }),
        })
    }

    /// Create a function taking no arguments.
    pub fn thunk(
        name: impl Into<String>,
        func: impl Fn() -> Result<Value, RenderError> + Send + Sync + 'static,
    ) -> Self {
        let name: String = name.into();
        let label = name.clone();
        Self::new(name, move |args| {
            if args.is_empty() {
                func()
            } else {
                Err(RenderError::ArgumentCount {
                    function: label.clone(),
                    expected: 0,
                    got: args.len(),
                })
            }
        })
    }

    /// The name this function reports in errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Result<Value, RenderError> {
        (self.func)(args)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Function")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
