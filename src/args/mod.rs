//! Command-line lexing pipeline.
//!
//! ```text
//! raw strings → Tokenizer → Collator → OptionRegistry
//!              (@files)    (name, [values])   (accumulated values per option)
//! ```
//!
//! Each stage is a forward-only cursor that can be tested on its own.

mod collator;
mod cursor;
mod registry;
mod suggest;
mod tokenizer;

pub use collator::{ArgOptionAndValues, Collator};
pub use cursor::ArgCursor;
pub use registry::{convert_flag_value, OptionAndValues, OptionId, OptionKind, OptionRegistry};
pub use suggest::{levenshtein_distance, suggest};
pub use tokenizer::{dashed, is_valid_long_name, lex, Token, Tokenizer};

use crate::config::ParserConfig;

/// Build the tokenizer → collator chain over raw arguments.
pub fn collate<I, S>(args: I, config: &ParserConfig) -> Collator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Collator::new(Tokenizer::new(ArgCursor::new(args), config))
}
