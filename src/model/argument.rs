use serde::Serialize;

use crate::args::{OptionId, OptionKind};
use crate::error::ParseError;
use crate::model::value::{Value, ValueType};

/// Replacement shown instead of sensitive values.
pub const REDACTED: &str = "****";

/// Engine-reserved arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialKind {
    Help,
    Version,
}

/// A resolved command parameter, owned by a [`crate::model::CommandModel`].
///
/// Everything except the bound values and the user-set marker is fixed when
/// the model is built.
#[derive(Debug, Clone)]
pub struct Argument {
    pub(crate) name: String,
    pub(crate) long_name: String,
    pub(crate) short_name: Option<char>,
    pub(crate) value_type: ValueType,
    pub(crate) choices: Vec<String>,
    pub(crate) collection: bool,
    pub(crate) min_elements: usize,
    pub(crate) max_elements: Option<usize>,
    pub(crate) default_values: Option<Vec<String>>,
    pub(crate) optional_type: bool,
    /// Indices of mutually exclusive arguments in the owning model.
    pub(crate) mutex: Vec<usize>,
    pub(crate) sensitive: bool,
    pub(crate) special: Option<SpecialKind>,
    pub(crate) hidden: bool,
    pub(crate) group: Option<String>,
    pub(crate) doc: String,
    pub(crate) option: Option<OptionId>,
    pub(crate) values: Vec<Value>,
    pub(crate) set_by_user: bool,
}

impl Argument {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    pub fn min_elements(&self) -> usize {
        self.min_elements
    }

    pub fn max_elements(&self) -> Option<usize> {
        self.max_elements
    }

    pub fn default_values(&self) -> Option<&[String]> {
        self.default_values.as_deref()
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    pub fn special(&self) -> Option<SpecialKind> {
        self.special
    }

    pub fn is_special(&self) -> bool {
        self.special.is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_set_by_user(&self) -> bool {
        self.set_by_user
    }

    /// Set by the user to something other than "cleared".
    pub fn has_user_value(&self) -> bool {
        self.set_by_user && !self.values.is_empty()
    }

    /// Optional iff it has a default, an optional type, may hold zero
    /// elements, or is engine-reserved.
    pub fn is_optional(&self) -> bool {
        self.default_values.is_some()
            || self.optional_type
            || (self.collection && self.min_elements == 0)
            || self.special.is_some()
    }

    pub fn is_required(&self) -> bool {
        !self.is_optional()
    }

    /// How the registry accumulates this argument's values.
    pub fn option_kind(&self) -> OptionKind {
        if self.collection {
            OptionKind::MultiValue
        } else if self.value_type == ValueType::Bool {
            OptionKind::Flag
        } else {
            OptionKind::SingleValue
        }
    }

    /// "int", or "list<int>" for collections.
    pub fn type_label(&self) -> String {
        if self.collection {
            format!("list<{}>", self.value_type.label())
        } else {
            self.value_type.label().to_string()
        }
    }

    /// Names registered with the option registry: long first, then short.
    pub fn option_names(&self) -> Vec<String> {
        let mut names = vec![self.long_name.clone()];
        if let Some(short) = self.short_name {
            names.push(short.to_string());
        }
        names
    }

    /// Strings for display: masked when sensitive.
    pub fn display_values<I>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        values
            .into_iter()
            .map(|v| {
                if self.sensitive {
                    REDACTED.to_string()
                } else {
                    v.to_string()
                }
            })
            .collect()
    }

    pub(crate) fn convert(&self, raw: &str) -> Result<Value, String> {
        self.value_type.convert(raw, &self.choices)
    }

    /// Bind the final accumulated command-line values.
    ///
    /// The clearing sentinel empties an optional argument (defaults included)
    /// and later values are appended after it.
    pub(crate) fn set_values(
        &mut self,
        raw: &[String],
        is_clear_token: impl Fn(&str) -> bool,
    ) -> Result<(), ParseError> {
        debug_assert!(!self.set_by_user, "argument '{}' bound twice", self.name);

        let clearable = self.is_optional();
        let mut values = Vec::with_capacity(raw.len());
        for value in raw {
            if clearable && is_clear_token(value) {
                values.clear();
                continue;
            }
            let converted = self.convert(value).map_err(|reason| ParseError::InvalidValue {
                argument: self.long_name.clone(),
                value: if self.sensitive {
                    REDACTED.to_string()
                } else {
                    value.clone()
                },
                reason,
            })?;
            values.push(converted);
        }

        self.values = values;
        self.set_by_user = true;
        Ok(())
    }
}
