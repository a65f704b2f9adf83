//! Declarations: how a command describes its parameters.
//!
//! Commands build these in code through the builder methods, or a whole
//! toolkit is deserialized from TOML:
//!
//! ```toml
//! [[command]]
//! name = "greet"
//! description = "Say hello."
//!
//! [[command.argument]]
//! name = "name"
//! type = "string"
//!
//! [[command.argument]]
//! name = "count"
//! type = "int"
//! default = "3"
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::value::ValueType;

/// Declaration of one command parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentSpec {
    /// Parameter identifier (e.g., "outputFile"). Values are looked up by it.
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Long option name; derived from `name` when absent.
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub short: Option<char>,
    /// Accepts any number of values.
    #[serde(default)]
    pub list: bool,
    /// Collections only (default: 1).
    #[serde(default)]
    pub min_elements: Option<usize>,
    /// Collections only (default: unbounded).
    #[serde(default)]
    pub max_elements: Option<usize>,
    /// Default values as they would be typed on the command line.
    #[serde(default, deserialize_with = "one_or_many")]
    pub default: Option<Vec<String>>,
    /// May be absent without a default.
    #[serde(default)]
    pub optional: bool,
    /// Names of parameters that may not be supplied together with this one.
    #[serde(default)]
    pub mutex: Vec<String>,
    #[serde(default)]
    pub sensitive: bool,
    /// Not settable from the command line, not documented.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub group: Option<String>,
    /// Allowed values of a choice parameter.
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub doc: String,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            long: None,
            short: None,
            list: false,
            min_elements: None,
            max_elements: None,
            default: None,
            optional: false,
            mutex: Vec::new(),
            sensitive: false,
            hidden: false,
            group: None,
            choices: Vec::new(),
            doc: String::new(),
        }
    }

    /// Boolean flag.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Bool)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Text)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Int)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Float)
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Path)
    }

    pub fn choice<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = Self::new(name, ValueType::Choice);
        spec.choices = choices.into_iter().map(Into::into).collect();
        spec
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    /// Minimum number of values of a collection; 0 makes it optional.
    pub fn min_elements(mut self, min: usize) -> Self {
        self.list = true;
        self.min_elements = Some(min);
        self
    }

    pub fn max_elements(mut self, max: usize) -> Self {
        self.list = true;
        self.max_elements = Some(max);
        self
    }

    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(vec![value.into()]);
        self
    }

    pub fn defaults<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn mutex(mut self, other: impl Into<String>) -> Self {
        self.mutex.push(other.into());
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

/// Declaration of a command: identity plus its ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDescriptor {
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    /// Free-text description (markup, rendered by a `DocRenderer`).
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "argument")]
    pub arguments: Vec<ArgumentSpec>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
            hidden: false,
            description: String::new(),
            arguments: Vec::new(),
        }
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn arg(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Accept `default = "x"` as well as `default = ["x", "y"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|v| match v {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_toml() {
        let descriptor: CommandDescriptor = toml::from_str(
            r#"
name = "greet"
description = "Say hello."

[[argument]]
name = "name"
type = "string"
short = "n"

[[argument]]
name = "tags"
type = "string"
list = true
default = ["a", "b"]

[[argument]]
name = "count"
type = "int"
default = "3"
"#,
        )
        .unwrap();

        assert_eq!(
            descriptor,
            CommandDescriptor::new("greet")
                .description("Say hello.")
                .arg(ArgumentSpec::text("name").short('n'))
                .arg(ArgumentSpec::text("tags").list().defaults(["a", "b"]))
                .arg(ArgumentSpec::int("count").default("3"))
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<CommandDescriptor, _> = toml::from_str(
            r#"
name = "greet"

[[argument]]
name = "name"
type = "string"
requird = true
"#,
        );
        assert!(result.is_err());
    }
}
