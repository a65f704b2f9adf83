//! Post-parse validation of a bound command model.

use crate::error::ParseError;
use crate::model::{Argument, CommandModel};

/// Check mutual exclusion, collection arity and requiredness, in that
/// order, reporting the first violation.
pub(crate) fn validate(model: &CommandModel) -> Result<(), ParseError> {
    let arguments = model.arguments();

    for (index, argument) in arguments.iter().enumerate() {
        if !argument.has_user_value() || argument.mutex.is_empty() {
            continue;
        }
        let mut conflicting: Vec<usize> = argument
            .mutex
            .iter()
            .copied()
            .filter(|&other| arguments[other].has_user_value())
            .collect();
        if conflicting.is_empty() {
            continue;
        }
        conflicting.push(index);
        conflicting.sort_unstable();
        conflicting.dedup();
        return Err(ParseError::MutuallyExclusive {
            arguments: conflicting
                .into_iter()
                .map(|i| arguments[i].long_name().to_string())
                .collect(),
        });
    }

    for argument in arguments {
        if argument.is_collection() {
            check_collection(argument, arguments)?;
        } else if argument.is_required()
            && argument.values().is_empty()
            && !partner_is_set(argument, arguments)
        {
            return Err(ParseError::MissingArgument {
                argument: argument.long_name().to_string(),
                alternatives: partner_names(argument, arguments),
            });
        }
    }

    Ok(())
}

fn check_collection(argument: &Argument, arguments: &[Argument]) -> Result<(), ParseError> {
    let count = argument.values().len();

    if count == 0 {
        if argument.is_required() && !partner_is_set(argument, arguments) {
            return Err(ParseError::MissingElements {
                argument: argument.long_name().to_string(),
            });
        }
        return Ok(());
    }

    // Defaults are not range-checked.
    if !argument.is_set_by_user() {
        return Ok(());
    }
    let too_many = argument.max_elements().is_some_and(|max| count > max);
    if count < argument.min_elements() || too_many {
        return Err(ParseError::ElementCount {
            argument: argument.long_name().to_string(),
            min: argument.min_elements(),
            max: argument.max_elements(),
            actual: count,
        });
    }
    Ok(())
}

fn partner_is_set(argument: &Argument, arguments: &[Argument]) -> bool {
    argument
        .mutex
        .iter()
        .any(|&other| arguments[other].has_user_value())
}

fn partner_names(argument: &Argument, arguments: &[Argument]) -> Vec<String> {
    argument
        .mutex
        .iter()
        .map(|&other| arguments[other].long_name().to_string())
        .collect()
}
