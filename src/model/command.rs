//! Command model: a descriptor resolved into validated [`Argument`]s.

use std::collections::HashSet;

use crate::args::is_valid_long_name;
use crate::config::ParserConfig;
use crate::error::DeclarationError;
use crate::model::argument::{Argument, SpecialKind};
use crate::model::naming::to_long_name;
use crate::model::spec::{ArgumentSpec, CommandDescriptor};
use crate::model::value::{Value, ValueType};

/// The argument model of one command, for one parse attempt.
///
/// Arguments live in declaration order in a single vector (engine-reserved
/// arguments last) and refer to each other by index.
#[derive(Debug, Clone)]
pub struct CommandModel {
    name: String,
    group: Option<String>,
    hidden: bool,
    description: String,
    arguments: Vec<Argument>,
}

impl CommandModel {
    /// Resolve a descriptor, failing fast on declaration errors.
    pub fn build(
        descriptor: &CommandDescriptor,
        config: &ParserConfig,
    ) -> Result<Self, DeclarationError> {
        let mut arguments = descriptor
            .arguments
            .iter()
            .map(resolve_argument)
            .collect::<Result<Vec<_>, _>>()?;

        if config.help_flag {
            arguments.push(special_argument(
                SpecialKind::Help,
                "help",
                Some('h'),
                "Display the help message.",
            ));
        }
        if config.version.is_some() {
            arguments.push(special_argument(
                SpecialKind::Version,
                "version",
                None,
                "Display the version and exit.",
            ));
        }

        check_unique_names(&arguments)?;
        link_mutex(&descriptor.arguments, &mut arguments)?;

        if let Some(unreachable) = arguments.iter().find(|a| a.hidden && a.is_required()) {
            return Err(DeclarationError::Unreachable {
                argument: unreachable.name.clone(),
            });
        }

        tracing::trace!(
            "Built model for command '{}' ({} arguments)",
            descriptor.name,
            arguments.len()
        );

        Ok(Self {
            name: descriptor.name.clone(),
            group: descriptor.group.clone(),
            hidden: descriptor.hidden,
            description: descriptor.description.clone(),
            arguments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All arguments, declared ones first, in declaration order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut [Argument] {
        &mut self.arguments
    }

    /// Look up an argument by parameter name.
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Whether any argument has been bound from the command line.
    pub fn is_parsed(&self) -> bool {
        self.arguments.iter().any(|a| a.set_by_user)
    }
}

fn resolve_argument(spec: &ArgumentSpec) -> Result<Argument, DeclarationError> {
    if spec.name.is_empty() {
        return Err(DeclarationError::InvalidName {
            name: spec.name.clone(),
        });
    }

    let long_name = spec.long.clone().unwrap_or_else(|| to_long_name(&spec.name));
    if !is_valid_long_name(&long_name) {
        return Err(DeclarationError::InvalidName { name: long_name });
    }
    if let Some(short) = spec.short {
        if !short.is_ascii_alphanumeric() {
            return Err(DeclarationError::InvalidName {
                name: short.to_string(),
            });
        }
    }

    if spec.value_type == ValueType::Choice && spec.choices.is_empty() {
        return Err(DeclarationError::MissingChoices {
            argument: spec.name.clone(),
        });
    }

    let collection = spec.list || spec.min_elements.is_some() || spec.max_elements.is_some();
    let (min_elements, max_elements) = if collection {
        (spec.min_elements.unwrap_or(1), spec.max_elements)
    } else {
        (0, Some(1))
    };
    if let Some(max) = max_elements {
        if min_elements > max {
            return Err(DeclarationError::InvalidElementBounds {
                argument: spec.name.clone(),
                min: min_elements,
                max,
            });
        }
    }

    let default_values = match &spec.default {
        Some(defaults) => Some(defaults.clone()),
        None if spec.value_type == ValueType::Bool && !collection && !spec.optional => {
            Some(vec!["false".to_string()])
        }
        None => None,
    };

    let mut argument = Argument {
        name: spec.name.clone(),
        long_name,
        short_name: spec.short,
        value_type: spec.value_type,
        choices: spec.choices.clone(),
        collection,
        min_elements,
        max_elements,
        default_values,
        optional_type: spec.optional,
        mutex: Vec::new(),
        sensitive: spec.sensitive,
        special: None,
        hidden: spec.hidden,
        group: spec.group.clone(),
        doc: spec.doc.clone(),
        option: None,
        values: Vec::new(),
        set_by_user: false,
    };
    argument.values = convert_defaults(&argument)?;
    Ok(argument)
}

fn convert_defaults(argument: &Argument) -> Result<Vec<Value>, DeclarationError> {
    let Some(defaults) = &argument.default_values else {
        return Ok(Vec::new());
    };

    if !argument.collection && defaults.len() > 1 {
        return Err(DeclarationError::InvalidDefault {
            argument: argument.name.clone(),
            value: defaults.join(", "),
            reason: "a single-value argument takes one default".to_string(),
        });
    }

    defaults
        .iter()
        .map(|raw| {
            argument
                .convert(raw)
                .map_err(|reason| DeclarationError::InvalidDefault {
                    argument: argument.name.clone(),
                    value: raw.clone(),
                    reason,
                })
        })
        .collect()
}

fn special_argument(
    kind: SpecialKind,
    name: &str,
    short: Option<char>,
    doc: &str,
) -> Argument {
    Argument {
        name: name.to_string(),
        long_name: name.to_string(),
        short_name: short,
        value_type: ValueType::Bool,
        choices: Vec::new(),
        collection: false,
        min_elements: 0,
        max_elements: Some(1),
        default_values: Some(vec!["false".to_string()]),
        optional_type: false,
        mutex: Vec::new(),
        sensitive: false,
        special: Some(kind),
        hidden: false,
        group: None,
        doc: doc.to_string(),
        option: None,
        values: vec![Value::Bool(false)],
        set_by_user: false,
    }
}

/// Parameter names, and every long/short option name, must be unique.
fn check_unique_names(arguments: &[Argument]) -> Result<(), DeclarationError> {
    let mut identifiers = HashSet::new();
    let mut option_names = HashSet::new();

    for argument in arguments {
        if !identifiers.insert(argument.name.as_str()) {
            return Err(DeclarationError::DuplicateOptionName {
                name: argument.name.clone(),
            });
        }
        if argument.hidden {
            continue;
        }
        for name in argument.option_names() {
            if !option_names.insert(name.clone()) {
                return Err(DeclarationError::DuplicateOptionName { name });
            }
        }
    }
    Ok(())
}

/// Resolve declared exclusions to indices, in both directions.
fn link_mutex(
    specs: &[ArgumentSpec],
    arguments: &mut [Argument],
) -> Result<(), DeclarationError> {
    let mut pairs = Vec::new();
    for (index, spec) in specs.iter().enumerate() {
        for target in &spec.mutex {
            let other = arguments
                .iter()
                .position(|a| a.special.is_none() && (&a.name == target || &a.long_name == target))
                .ok_or_else(|| DeclarationError::DanglingMutex {
                    argument: spec.name.clone(),
                    target: target.clone(),
                })?;
            if other != index {
                pairs.push((index, other));
            }
        }
    }

    for (a, b) in pairs {
        arguments[a].mutex.push(b);
        arguments[b].mutex.push(a);
    }
    for argument in arguments.iter_mut() {
        argument.mutex.sort_unstable();
        argument.mutex.dedup();
    }
    Ok(())
}
