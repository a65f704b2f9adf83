//! Binder: drives the lexing pipeline over a command model.
//!
//! ```text
//! descriptor → CommandModel ─┐
//! raw args → collate → OptionRegistry → Argument values → validate → C::from_values
//! ```
//!
//! Every user error ends in [`ParseOutcome::Failure`]; only declaration
//! errors escape as `Err`.

mod validate;
mod values;

pub use values::BoundValues;

use std::fmt;

use crate::args::{collate, OptionRegistry};
use crate::config::ParserConfig;
use crate::error::{DeclarationError, ParseError};
use crate::metadata::{CommandMetadata, DocRenderer, PlainRenderer, Usage};
use crate::model::{CommandDescriptor, CommandModel, SpecialKind, Value};

/// A command type the engine can construct from bound values.
pub trait Command: Sized {
    /// Declared parameters of the command.
    fn descriptor() -> CommandDescriptor;

    /// Build the command. An error becomes a command-line failure carrying
    /// its message.
    fn from_values(values: &BoundValues) -> anyhow::Result<Self>;
}

/// Terminal state of one parse attempt.
#[derive(Debug)]
pub enum ParseOutcome<T> {
    Success(T),
    Failure(ParseFailure),
    HelpRequested(Usage),
    VersionRequested(String),
}

impl<T> ParseOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            ParseOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseOutcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

/// A parse that failed on user input.
#[derive(Debug)]
pub struct ParseFailure {
    pub error: ParseError,
    /// The command line from the failing argument on, verbatim where possible.
    pub unparsed: Vec<String>,
    pub usage: Usage,
}

impl ParseFailure {
    /// "error: ..." followed by the unparsed tail, if any.
    pub fn message(&self) -> String {
        let mut message = format!("error: {}", self.error);
        if !self.unparsed.is_empty() {
            message.push_str("\nunparsed arguments: ");
            message.push_str(&self.unparsed.join(" "));
        }
        message
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Where binding stopped.
enum Step {
    Bound,
    Special(SpecialKind),
    Failed(ParseError, Vec<String>),
}

/// Entry point of the engine: builds models, parses, projects metadata.
pub struct Parser {
    config: ParserConfig,
    renderer: Box<dyn DocRenderer>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            renderer: Box::new(PlainRenderer),
        }
    }

    /// Use `renderer` for documentation text in metadata and usage.
    pub fn with_renderer(mut self, renderer: impl DocRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn renderer(&self) -> &dyn DocRenderer {
        self.renderer.as_ref()
    }

    pub fn model(&self, descriptor: &CommandDescriptor) -> Result<CommandModel, DeclarationError> {
        CommandModel::build(descriptor, &self.config)
    }

    /// Metadata of an unparsed command.
    pub fn describe(
        &self,
        descriptor: &CommandDescriptor,
    ) -> Result<CommandMetadata, DeclarationError> {
        Ok(CommandMetadata::from_model(
            &self.model(descriptor)?,
            self.renderer(),
        ))
    }

    pub fn metadata<C: Command>(&self) -> Result<CommandMetadata, DeclarationError> {
        self.describe(&C::descriptor())
    }

    pub fn usage(&self, model: &CommandModel) -> Usage {
        Usage::from_metadata(&CommandMetadata::from_model(model, self.renderer()))
    }

    /// Parse `args` against a descriptor without a target type.
    pub fn parse_values<I, S>(
        &self,
        descriptor: &CommandDescriptor,
        args: I,
    ) -> Result<ParseOutcome<BoundValues>, DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (model, step) = self.bind(descriptor, args)?;

        let outcome = match step {
            Step::Bound => ParseOutcome::Success(BoundValues::from_model(&model)),
            Step::Special(SpecialKind::Help) => ParseOutcome::HelpRequested(self.usage(&model)),
            Step::Special(SpecialKind::Version) => {
                ParseOutcome::VersionRequested(self.config.version.clone().unwrap_or_default())
            }
            Step::Failed(error, unparsed) => self.failure(&model, error, unparsed),
        };
        Ok(outcome)
    }

    /// Parse `args` and construct `C` from the bound values.
    pub fn parse<C, I, S>(&self, args: I) -> Result<ParseOutcome<C>, DeclarationError>
    where
        C: Command,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let descriptor = C::descriptor();
        let outcome = match self.parse_values(&descriptor, args)? {
            ParseOutcome::Success(values) => match C::from_values(&values) {
                Ok(command) => ParseOutcome::Success(command),
                Err(err) => {
                    tracing::debug!("Command '{}' rejected its values: {:#}", descriptor.name, err);
                    let model = self.model(&descriptor)?;
                    self.failure(
                        &model,
                        ParseError::Construction {
                            message: format!("{:#}", err),
                        },
                        Vec::new(),
                    )
                }
            },
            ParseOutcome::Failure(failure) => ParseOutcome::Failure(failure),
            ParseOutcome::HelpRequested(usage) => ParseOutcome::HelpRequested(usage),
            ParseOutcome::VersionRequested(version) => ParseOutcome::VersionRequested(version),
        };
        Ok(outcome)
    }

    fn failure<T>(
        &self,
        model: &CommandModel,
        error: ParseError,
        unparsed: Vec<String>,
    ) -> ParseOutcome<T> {
        tracing::debug!(
            "Parse of '{}' failed ({}): {}",
            model.name(),
            error.error_type(),
            error
        );
        ParseOutcome::Failure(ParseFailure {
            error,
            unparsed,
            usage: self.usage(model),
        })
    }

    fn bind<I, S>(
        &self,
        descriptor: &CommandDescriptor,
        args: I,
    ) -> Result<(CommandModel, Step), DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut model = self.model(descriptor)?;
        let mut registry = OptionRegistry::new().with_max_suggestions(self.config.max_suggestions);
        for argument in model.arguments_mut().iter_mut().filter(|a| !a.is_hidden()) {
            argument.option = Some(registry.register(argument.option_kind(), &argument.option_names())?);
        }

        let step = self.run(&mut model, &mut registry, args);
        if matches!(step, Step::Bound) {
            tracing::debug!("Parsed command '{}'", model.name());
        }
        Ok((model, step))
    }

    fn run<I, S>(&self, model: &mut CommandModel, registry: &mut OptionRegistry, args: I) -> Step
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collator = collate(args, &self.config);
        while let Some(record) = collator.next() {
            let record = match record {
                Ok(record) => record,
                Err(err) => return Step::Failed(err, collator.take_remaining()),
            };
            if let Err(err) = registry.add(&record.name, record.values) {
                let mut unparsed = record.raw;
                unparsed.extend(collator.take_remaining());
                return Step::Failed(err, unparsed);
            }
        }

        // Special arguments are resolved before any declared value is converted.
        if let Err(err) = self.bind_values(model, registry, true) {
            return Step::Failed(err, Vec::new());
        }
        for kind in [SpecialKind::Help, SpecialKind::Version] {
            let requested = model
                .arguments()
                .iter()
                .any(|a| a.special() == Some(kind) && a.values().first() == Some(&Value::Bool(true)));
            if requested {
                tracing::debug!("Command '{}': {:?} requested", model.name(), kind);
                // Declared values only feed the usage screen from here on.
                if let Err(err) = self.bind_values(model, registry, false) {
                    tracing::debug!("Ignoring {} on {:?} request", err.error_type(), kind);
                }
                return Step::Special(kind);
            }
        }

        if let Err(err) = self.bind_values(model, registry, false) {
            return Step::Failed(err, Vec::new());
        }

        match validate::validate(model) {
            Ok(()) => Step::Bound,
            Err(err) => Step::Failed(err, Vec::new()),
        }
    }

    /// Hand accumulated option values to either the special or the declared
    /// arguments of `model`. Every argument is bound; the first conversion
    /// error is returned.
    fn bind_values(
        &self,
        model: &mut CommandModel,
        registry: &OptionRegistry,
        special: bool,
    ) -> Result<(), ParseError> {
        let mut first_error = None;
        for argument in model
            .arguments_mut()
            .iter_mut()
            .filter(|a| a.is_special() == special)
        {
            let Some(id) = argument.option else {
                continue;
            };
            let option = registry.option(id);
            if !option.is_present() {
                continue;
            }
            tracing::trace!(
                "Binding {} = {:?}",
                option.display_name(),
                argument.display_values(option.values())
            );
            if let Err(err) =
                argument.set_values(option.values(), |v: &str| self.config.is_clear_token(v))
            {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
