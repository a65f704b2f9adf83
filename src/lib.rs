//! Command-line argument parsing engine for multi-command toolkits.
//!
//! A command declares its parameters ([`CommandDescriptor`]); the engine
//! turns raw command-line strings into validated, typed values
//! ([`BoundValues`]) and hands them to the command's constructor
//! ([`Command::from_values`]). The same declaration answers documentation
//! queries through [`CommandMetadata`] and [`Usage`].
//!
//! ```no_run
//! use cmdargs::{ArgumentSpec, BoundValues, Command, CommandDescriptor, ParseOutcome, Parser};
//!
//! struct Greet {
//!     name: String,
//!     count: i64,
//! }
//!
//! impl Command for Greet {
//!     fn descriptor() -> CommandDescriptor {
//!         CommandDescriptor::new("greet")
//!             .arg(ArgumentSpec::text("name").short('n'))
//!             .arg(ArgumentSpec::int("count").default("3"))
//!     }
//!
//!     fn from_values(values: &BoundValues) -> anyhow::Result<Self> {
//!         Ok(Self {
//!             name: values.value("name")?,
//!             count: values.value("count")?,
//!         })
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! match Parser::default().parse::<Greet, _, _>(std::env::args().skip(1))? {
//!     ParseOutcome::Success(greet) => {
//!         for _ in 0..greet.count {
//!             println!("Hello, {}!", greet.name);
//!         }
//!     }
//!     ParseOutcome::Failure(failure) => eprintln!("{}", failure.message()),
//!     ParseOutcome::HelpRequested(usage) => println!("{:#?}", usage),
//!     ParseOutcome::VersionRequested(version) => println!("{}", version),
//! }
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod binder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod model;

pub use binder::{BoundValues, Command, ParseFailure, ParseOutcome, Parser};
pub use catalog::{CatalogError, CommandCatalog};
pub use config::{ConfigError, ParserConfig};
pub use error::{BoundValueError, DeclarationError, ParseError};
pub use metadata::{ArgumentMetadata, CommandMetadata, DocRenderer, PlainRenderer, Usage, UsageSection};
pub use model::{ArgumentSpec, CommandDescriptor, CommandModel, Value, ValueType};
