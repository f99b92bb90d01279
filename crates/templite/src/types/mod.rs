mod context;
mod function;
mod object;
mod value;

pub use context::Context;
pub use function::Function;
pub use object::{Object, Record};
pub use value::Value;
