use serde_json::{Map, Value as JsonValue};

use crate::error::BoundValueError;
use crate::model::{Argument, CommandModel, FromValue, Value, REDACTED};

/// Values bound to one command after a successful parse.
///
/// Looked up by parameter name. Hidden arguments carry their defaults;
/// engine-reserved arguments are not included.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundValues {
    command: String,
    entries: Vec<BoundEntry>,
}

#[derive(Debug, Clone, PartialEq)]
struct BoundEntry {
    name: String,
    collection: bool,
    sensitive: bool,
    set_by_user: bool,
    values: Vec<Value>,
}

impl BoundValues {
    pub(crate) fn from_model(model: &CommandModel) -> Self {
        let entries = model
            .arguments()
            .iter()
            .filter(|a| !a.is_special())
            .map(BoundEntry::from_argument)
            .collect();
        Self {
            command: model.name().to_string(),
            entries,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Converted values of an argument, in command-line order.
    pub fn raw(&self, name: &str) -> Result<&[Value], BoundValueError> {
        Ok(&self.entry(name)?.values)
    }

    /// The single value of a scalar argument.
    pub fn value<T: FromValue>(&self, name: &str) -> Result<T, BoundValueError> {
        self.optional(name)?.ok_or_else(|| BoundValueError::Missing {
            name: name.to_string(),
        })
    }

    /// The value of an argument that may be absent (optional or cleared).
    pub fn optional<T: FromValue>(&self, name: &str) -> Result<Option<T>, BoundValueError> {
        match self.entry(name)?.values.first() {
            Some(value) => extract(name, value).map(Some),
            None => Ok(None),
        }
    }

    /// Every value of a collection argument.
    pub fn list<T: FromValue>(&self, name: &str) -> Result<Vec<T>, BoundValueError> {
        self.entry(name)?
            .values
            .iter()
            .map(|value| extract(name, value))
            .collect()
    }

    /// Whether the command line supplied this argument.
    pub fn is_set_by_user(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.name == name && e.set_by_user)
    }

    /// JSON object of all bound values, sensitive ones masked.
    ///
    /// Scalars map to a value or `null`, collections to an array.
    pub fn to_json(&self) -> JsonValue {
        let mut object = Map::new();
        for entry in &self.entries {
            let shown: Vec<JsonValue> = entry
                .values
                .iter()
                .map(|value| {
                    if entry.sensitive {
                        JsonValue::from(REDACTED)
                    } else {
                        serde_json::to_value(value).unwrap_or(JsonValue::Null)
                    }
                })
                .collect();
            let json = if entry.collection {
                JsonValue::Array(shown)
            } else {
                shown.into_iter().next().unwrap_or(JsonValue::Null)
            };
            object.insert(entry.name.clone(), json);
        }
        JsonValue::Object(object)
    }

    fn entry(&self, name: &str) -> Result<&BoundEntry, BoundValueError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| BoundValueError::Undeclared {
                name: name.to_string(),
            })
    }
}

impl BoundEntry {
    fn from_argument(argument: &Argument) -> Self {
        Self {
            name: argument.name().to_string(),
            collection: argument.is_collection(),
            sensitive: argument.is_sensitive(),
            set_by_user: argument.is_set_by_user(),
            values: argument.values().to_vec(),
        }
    }
}

fn extract<T: FromValue>(name: &str, value: &Value) -> Result<T, BoundValueError> {
    T::from_value(value).ok_or_else(|| BoundValueError::TypeMismatch {
        name: name.to_string(),
        expected: T::TYPE_NAME,
        actual: value.type_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::model::{ArgumentSpec, CommandDescriptor};

    fn bound() -> BoundValues {
        let model = CommandModel::build(
            &CommandDescriptor::new("login")
                .arg(ArgumentSpec::text("user").default("root"))
                .arg(ArgumentSpec::text("password").sensitive().default("hunter2"))
                .arg(ArgumentSpec::int("ports").list().defaults(["80", "443"]))
                .arg(ArgumentSpec::float("ratio").optional()),
            &ParserConfig::default(),
        )
        .unwrap();
        BoundValues::from_model(&model)
    }

    #[test]
    fn test_typed_accessors() {
        let values = bound();
        assert_eq!(values.command(), "login");
        assert_eq!(values.value::<String>("user").unwrap(), "root");
        assert_eq!(values.list::<i64>("ports").unwrap(), vec![80, 443]);
        assert_eq!(values.optional::<f64>("ratio").unwrap(), None);
        assert!(!values.is_set_by_user("user"));
        assert_eq!(values.names().collect::<Vec<_>>(), vec!["user", "password", "ports", "ratio"]);
    }

    #[test]
    fn test_accessor_errors() {
        let values = bound();
        assert_eq!(
            values.value::<i64>("user"),
            Err(BoundValueError::TypeMismatch {
                name: "user".into(),
                expected: "int",
                actual: "string"
            })
        );
        assert_eq!(
            values.value::<f64>("ratio"),
            Err(BoundValueError::Missing { name: "ratio".into() })
        );
        assert_eq!(
            values.value::<String>("help"),
            Err(BoundValueError::Undeclared { name: "help".into() })
        );
    }

    #[test]
    fn test_json_masks_sensitive_values() {
        let json = bound().to_json();
        assert_eq!(json["user"], "root");
        assert_eq!(json["password"], REDACTED);
        assert_eq!(json["ports"], serde_json::json!([80, 443]));
        assert!(json["ratio"].is_null());
    }
}
