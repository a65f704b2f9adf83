//! Error types for the parsing engine.
//!
//! Two families are kept apart: [`ParseError`] describes bad user input and is
//! always recovered into a [`crate::binder::ParseFailure`], while
//! [`DeclarationError`] describes a broken command declaration and aborts model
//! construction immediately.

use std::path::PathBuf;
use thiserror::Error;

/// Errors caused by the command line a user typed.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed token stream: a value without an owning option, an empty
    /// token, or a dash sequence that is not an option name.
    #[error("illegal option: {token}")]
    OptionName { token: String },

    /// No registered option matches the given name or prefix.
    #[error("unknown option '{name}'{}", did_you_mean(.suggestions))]
    IllegalOptionName {
        name: String,
        suggestions: Vec<String>,
    },

    /// A prefix matches more than one distinct option.
    #[error("option '{name}' is ambiguous, possible matches: {}", .candidates.join(", "))]
    AmbiguousOption {
        name: String,
        candidates: Vec<String>,
    },

    /// A flag or single-value option was supplied more than once.
    #[error("option '{option}' was specified multiple times")]
    OptionSpecifiedMultipleTimes { option: String },

    /// A multi-value option was given without any value.
    #[error("option '{option}' requires at least one value")]
    TooFewValues { option: String },

    /// A flag or single-value option was given too many values at once.
    #[error("option '{option}' accepts a single value but got {count}")]
    TooManyValues { option: String, count: usize },

    /// A flag was given something other than a boolean token.
    #[error("illegal value '{value}' for flag '{option}', expected one of true/t/yes/y or false/f/no/n")]
    IllegalFlagValue { option: String, value: String },

    /// An argument file could not be read.
    #[error("failed to read argument file '{}': {source}", .path.display())]
    ArgumentFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An argument file includes itself, directly or transitively.
    #[error("argument file '{}' includes itself", .path.display())]
    ArgumentFileCycle { path: PathBuf },

    /// Argument files are nested deeper than the configured limit.
    #[error("argument file '{}' exceeds the nesting limit of {limit}", .path.display())]
    ArgumentFileDepth { path: PathBuf, limit: usize },

    /// A required argument was not supplied.
    #[error("argument '{argument}' is required{}", alternatives_suffix(.alternatives))]
    MissingArgument {
        argument: String,
        alternatives: Vec<String>,
    },

    /// A required collection argument received no values at all.
    #[error("argument '{argument}' must be specified at least once")]
    MissingElements { argument: String },

    /// A collection argument received a number of values outside its bounds.
    #[error("argument '{argument}' expects {} values but got {actual}", bounds(*.min, *.max))]
    ElementCount {
        argument: String,
        min: usize,
        max: Option<usize>,
        actual: usize,
    },

    /// Arguments declared mutually exclusive were supplied together.
    #[error("arguments {} are mutually exclusive", quoted(.arguments))]
    MutuallyExclusive { arguments: Vec<String> },

    /// A value could not be converted to the argument's type.
    #[error("invalid value '{value}' for argument '{argument}': {reason}")]
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },

    /// The target command rejected the bound values.
    #[error("{message}")]
    Construction { message: String },
}

impl ParseError {
    /// Stable label for the error kind, for machine-readable output.
    pub fn error_type(&self) -> &'static str {
        match self {
            ParseError::OptionName { .. } => "option_name",
            ParseError::IllegalOptionName { .. } => "illegal_option_name",
            ParseError::AmbiguousOption { .. } => "duplicate_option_name",
            ParseError::OptionSpecifiedMultipleTimes { .. } => "option_specified_multiple_times",
            ParseError::TooFewValues { .. } => "too_few_values",
            ParseError::TooManyValues { .. } => "too_many_values",
            ParseError::IllegalFlagValue { .. } => "illegal_flag_value",
            ParseError::ArgumentFileRead { .. }
            | ParseError::ArgumentFileCycle { .. }
            | ParseError::ArgumentFileDepth { .. } => "io_error",
            ParseError::MissingArgument { .. } | ParseError::MissingElements { .. } => {
                "missing_argument"
            }
            ParseError::ElementCount { .. } => "element_count",
            ParseError::MutuallyExclusive { .. } => "mutually_exclusive",
            ParseError::InvalidValue { .. } => "invalid_value",
            ParseError::Construction { .. } => "construction",
        }
    }
}

/// Errors in a command's declaration. These are programming errors and are
/// never produced by user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("option name '{name}' is registered more than once")]
    DuplicateOptionName { name: String },

    #[error("argument '{argument}' is mutually exclusive with unknown argument '{target}'")]
    DanglingMutex { argument: String, target: String },

    #[error("argument '{argument}' is required but cannot receive a value from the command line")]
    Unreachable { argument: String },

    #[error("'{name}' is not a valid option name")]
    InvalidName { name: String },

    #[error("default value '{value}' of argument '{argument}' is invalid: {reason}")]
    InvalidDefault {
        argument: String,
        value: String,
        reason: String,
    },

    #[error("argument '{argument}' has min_elements {min} greater than max_elements {max}")]
    InvalidElementBounds {
        argument: String,
        min: usize,
        max: usize,
    },

    #[error("choice argument '{argument}' declares no choices")]
    MissingChoices { argument: String },

    #[error("command '{name}' is declared more than once")]
    DuplicateCommand { name: String },
}

/// Errors from the typed accessors of [`crate::binder::BoundValues`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundValueError {
    #[error("no argument named '{name}' is declared")]
    Undeclared { name: String },

    #[error("argument '{name}' holds {actual} values, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("argument '{name}' has no value")]
    Missing { name: String },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean {}?", quoted(suggestions))
    }
}

fn alternatives_suffix(alternatives: &[String]) -> String {
    if alternatives.is_empty() {
        String::new()
    } else {
        format!(" unless one of {} is specified", quoted(alternatives))
    }
}

fn bounds(min: usize, max: Option<usize>) -> String {
    match max {
        Some(max) if max == min => format!("exactly {}", min),
        Some(max) => format!("between {} and {}", min, max),
        None => format!("at least {}", min),
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_option_lists_suggestions() {
        let err = ParseError::IllegalOptionName {
            name: "verbos".to_string(),
            suggestions: vec!["verbose".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown option 'verbos', did you mean 'verbose'?"
        );
        assert_eq!(err.error_type(), "illegal_option_name");
    }

    #[test]
    fn test_missing_argument_mentions_alternatives() {
        let err = ParseError::MissingArgument {
            argument: "input".to_string(),
            alternatives: vec!["input-list".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "argument 'input' is required unless one of 'input-list' is specified"
        );
    }

    #[test]
    fn test_element_count_bounds_wording() {
        let err = ParseError::ElementCount {
            argument: "file".to_string(),
            min: 1,
            max: Some(3),
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "argument 'file' expects between 1 and 3 values but got 5"
        );
    }
}
