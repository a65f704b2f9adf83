//! Option registry: single source of truth for registered option names.
//!
//! Pure string bookkeeping: names resolve to options (exactly or by
//! unambiguous prefix) and values accumulate per option according to its
//! [`OptionKind`]. Nothing here knows about target types or defaults.

use std::collections::HashMap;

use serde::Serialize;

use crate::args::suggest::suggest;
use crate::args::tokenizer::dashed;
use crate::error::{DeclarationError, ParseError};

/// How many values an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Boolean flag, value optional (e.g., --verbose, --verbose=no).
    Flag,
    /// Exactly one value (e.g., --output <FILE>).
    SingleValue,
    /// One or more values per occurrence, accumulated across occurrences.
    MultiValue,
}

/// Handle of a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionId(usize);

/// A registered option and the values accumulated for it.
#[derive(Debug, Clone)]
pub struct OptionAndValues {
    kind: OptionKind,
    names: Vec<String>,
    values: Vec<String>,
    occurrences: usize,
}

impl OptionAndValues {
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// All names of the option, in registration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Accumulated values, in command-line order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether the option appeared on the command line.
    pub fn is_present(&self) -> bool {
        self.occurrences > 0
    }

    /// Name for error messages, with its dashes (e.g., "--output").
    pub fn display_name(&self) -> String {
        self.names.first().map(|n| dashed(n)).unwrap_or_default()
    }
}

/// Map from every registered name to its option.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    options: Vec<OptionAndValues>,
    by_name: HashMap<String, usize>,
    max_suggestions: usize,
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            by_name: HashMap::new(),
            max_suggestions: 3,
        }
    }

    /// Limit the number of "did you mean" suggestions.
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    /// Register an option under all of its names.
    ///
    /// Fails without registering anything if any name is already taken,
    /// including by an earlier name of the same call.
    pub fn register<S: AsRef<str>>(
        &mut self,
        kind: OptionKind,
        names: &[S],
    ) -> Result<OptionId, DeclarationError> {
        let mut seen: Vec<&str> = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            if self.by_name.contains_key(name) || seen.contains(&name) {
                return Err(DeclarationError::DuplicateOptionName {
                    name: name.to_string(),
                });
            }
            seen.push(name);
        }

        tracing::trace!("Registered {:?} option {:?}", kind, seen);
        let index = self.options.len();
        for name in &seen {
            self.by_name.insert(name.to_string(), index);
        }
        self.options.push(OptionAndValues {
            kind,
            names: seen.iter().map(|n| n.to_string()).collect(),
            values: Vec::new(),
            occurrences: 0,
        });
        Ok(OptionId(index))
    }

    /// Resolve a name exactly, or as an unambiguous prefix of registered names.
    pub fn resolve(&self, name: &str) -> Result<OptionId, ParseError> {
        if let Some(&index) = self.by_name.get(name) {
            return Ok(OptionId(index));
        }

        let mut matches: Vec<(&str, usize)> = if name.is_empty() {
            Vec::new()
        } else {
            self.by_name
                .iter()
                .filter(|(registered, _)| registered.starts_with(name))
                .map(|(registered, &index)| (registered.as_str(), index))
                .collect()
        };
        matches.sort();

        let mut distinct: Vec<usize> = matches.iter().map(|&(_, index)| index).collect();
        distinct.sort_unstable();
        distinct.dedup();

        match distinct.as_slice() {
            [] => Err(ParseError::IllegalOptionName {
                name: dashed(name),
                suggestions: suggest(
                    name,
                    self.by_name.keys().map(String::as_str),
                    self.max_suggestions,
                )
                .iter()
                .map(|s| dashed(s))
                .collect(),
            }),
            [index] => Ok(OptionId(*index)),
            _ => Err(ParseError::AmbiguousOption {
                name: dashed(name),
                candidates: matches.iter().map(|(n, _)| dashed(n)).collect(),
            }),
        }
    }

    /// Resolve `name` and accumulate `values` for it.
    ///
    /// - Flag: no value means "true"; one value must be a boolean token;
    ///   at most one occurrence.
    /// - SingleValue: exactly one value, at most one occurrence.
    /// - MultiValue: at least one value per occurrence, unbounded otherwise.
    pub fn add(&mut self, name: &str, values: Vec<String>) -> Result<OptionId, ParseError> {
        let id = self.resolve(name)?;
        let option = &mut self.options[id.0];

        match option.kind {
            OptionKind::Flag => {
                let value = match values.as_slice() {
                    [] => "true",
                    [value] => {
                        convert_flag_value(value).ok_or_else(|| ParseError::IllegalFlagValue {
                            option: option.display_name(),
                            value: value.clone(),
                        })?
                    }
                    _ => {
                        return Err(ParseError::TooManyValues {
                            option: option.display_name(),
                            count: values.len(),
                        })
                    }
                };
                if option.is_present() {
                    return Err(ParseError::OptionSpecifiedMultipleTimes {
                        option: option.display_name(),
                    });
                }
                option.values.push(value.to_string());
            }
            OptionKind::SingleValue => {
                if option.is_present() {
                    return Err(ParseError::OptionSpecifiedMultipleTimes {
                        option: option.display_name(),
                    });
                }
                match values.len() {
                    0 => {
                        return Err(ParseError::TooFewValues {
                            option: option.display_name(),
                        })
                    }
                    1 => option.values.extend(values),
                    count => {
                        return Err(ParseError::TooManyValues {
                            option: option.display_name(),
                            count,
                        })
                    }
                }
            }
            OptionKind::MultiValue => {
                if values.is_empty() {
                    return Err(ParseError::TooFewValues {
                        option: option.display_name(),
                    });
                }
                option.values.extend(values);
            }
        }

        option.occurrences += 1;
        tracing::trace!(
            "Accumulated option {} ({} values)",
            option.display_name(),
            option.values.len()
        );
        Ok(id)
    }

    /// Whether `name` is registered exactly.
    pub fn has_option_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether the option `name` resolves to has accumulated any value.
    pub fn has_option_values(&self, name: &str) -> bool {
        self.resolve(name)
            .map(|id| !self.options[id.0].values.is_empty())
            .unwrap_or(false)
    }

    /// The single accumulated value of an option.
    pub fn single_value(&self, name: &str) -> Result<&str, ParseError> {
        let option = self.option(self.resolve(name)?);
        match option.values.as_slice() {
            [value] => Ok(value),
            [] => Err(ParseError::TooFewValues {
                option: option.display_name(),
            }),
            values => Err(ParseError::TooManyValues {
                option: option.display_name(),
                count: values.len(),
            }),
        }
    }

    /// Every value accumulated for an option.
    pub fn option_values(&self, name: &str) -> Result<&[String], ParseError> {
        Ok(self.option(self.resolve(name)?).values())
    }

    pub fn option(&self, id: OptionId) -> &OptionAndValues {
        &self.options[id.0]
    }
}

/// Normalise a flag value: `true/t/yes/y` → "true", `false/f/no/n` → "false".
pub fn convert_flag_value(value: &str) -> Option<&'static str> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Some("true"),
        "false" | "f" | "no" | "n" => Some("false"),
        _ => None,
    }
}
