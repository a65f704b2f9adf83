//! Parser configuration: tunables of the command-line grammar.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::ParserConfig;
