use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::args::convert_flag_value;

/// Type of the values an argument accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    #[serde(rename = "string")]
    Text,
    Int,
    Float,
    Path,
    /// One of a declared set of strings.
    Choice,
}

impl ValueType {
    /// Label shown in usage and metadata.
    pub fn label(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Text => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Path => "path",
            ValueType::Choice => "choice",
        }
    }

    /// Convert a raw command-line string. The error is a short reason.
    pub fn convert(&self, raw: &str, choices: &[String]) -> Result<Value, String> {
        match self {
            ValueType::Bool => convert_flag_value(raw)
                .map(|v| Value::Bool(v == "true"))
                .ok_or_else(|| "expected a boolean".to_string()),
            ValueType::Text => Ok(Value::Text(raw.to_string())),
            ValueType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| format!("expected an integer ({})", e)),
            ValueType::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| format!("expected a number ({})", e)),
            ValueType::Path => {
                if raw.is_empty() {
                    Err("expected a path".to_string())
                } else {
                    Ok(Value::Path(PathBuf::from(raw)))
                }
            }
            ValueType::Choice => choices
                .iter()
                .find(|choice| choice.as_str() == raw)
                .map(|choice| Value::Text(choice.clone()))
                .ok_or_else(|| format!("expected one of: {}", choices.join(", "))),
        }
    }
}

/// A converted argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Text(String),
    Int(i64),
    Float(f64),
    Path(PathBuf),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Text(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Path(_) => "path",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Rust types a [`Value`] can be extracted into.
pub trait FromValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Path(p) => Some(p.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_scalars() {
        assert_eq!(ValueType::Int.convert("42", &[]), Ok(Value::Int(42)));
        assert_eq!(ValueType::Float.convert("2.5", &[]), Ok(Value::Float(2.5)));
        assert_eq!(ValueType::Bool.convert("Yes", &[]), Ok(Value::Bool(true)));
        assert!(ValueType::Int.convert("forty", &[]).is_err());
        assert!(ValueType::Path.convert("", &[]).is_err());
    }

    #[test]
    fn test_convert_choice() {
        let choices = vec!["fast".to_string(), "slow".to_string()];
        assert_eq!(
            ValueType::Choice.convert("fast", &choices),
            Ok(Value::Text("fast".into()))
        );
        assert_eq!(
            ValueType::Choice.convert("medium", &choices),
            Err("expected one of: fast, slow".to_string())
        );
    }
}
