//! Argument model: what a command declares and what the engine resolves
//! from it.

mod argument;
mod command;
mod naming;
mod spec;
mod value;

pub use argument::{Argument, SpecialKind, REDACTED};
pub use command::CommandModel;
pub use naming::to_long_name;
pub use spec::{ArgumentSpec, CommandDescriptor};
pub use value::{FromValue, Value, ValueType};
