//! Build option schema and per-run selections.
//!
//! Options are a mapping from name to a currently-selected value, each
//! constrained to an enumerated domain. Presence is structural: an
//! option removed from the mapping means "does not apply here", which is
//! a different state than `false`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// Whether the library is built as a shared object or a static archive.
pub const SHARED: &str = "shared";

/// Whether position-independent code is requested. Only meaningful for
/// static builds on platforms that support it.
pub const FPIC: &str = "fPIC";

/// A value an option can take.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl OptionValue {
    /// The boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Str(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

/// Declared options and their currently-selected values.
///
/// The domain records which choices an option offers; the value mapping
/// records the current selection. Either side can lose an entry during
/// normalization: dropping the value leaves the option declared but
/// inapplicable, dropping the whole option withdraws it as a choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    domains: BTreeMap<String, Vec<OptionValue>>,
    values: BTreeMap<String, OptionValue>,
}

impl OptionMap {
    /// Create an empty option map.
    pub fn new() -> Self {
        OptionMap::default()
    }

    /// Declare an option with its enumerated domain and default value.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        domain: Vec<OptionValue>,
        default: OptionValue,
    ) -> Result<(), RecipeError> {
        let name = name.into();
        if !domain.contains(&default) {
            return Err(RecipeError::ValueNotInDomain {
                name,
                value: default.to_string(),
            });
        }
        self.domains.insert(name.clone(), domain);
        self.values.insert(name, default);
        Ok(())
    }

    /// Declare a boolean option with its default value.
    pub fn declare_bool(&mut self, name: impl Into<String>, default: bool) {
        let name = name.into();
        self.domains.insert(
            name.clone(),
            vec![OptionValue::Bool(true), OptionValue::Bool(false)],
        );
        self.values.insert(name, OptionValue::Bool(default));
    }

    /// Select a value for a declared option.
    ///
    /// Rejects names outside the schema and values outside the option's
    /// domain.
    pub fn set(&mut self, name: &str, value: OptionValue) -> Result<(), RecipeError> {
        let domain = self
            .domains
            .get(name)
            .ok_or_else(|| RecipeError::UnknownOption {
                name: name.to_string(),
            })?;

        if !domain.contains(&value) {
            return Err(RecipeError::ValueNotInDomain {
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Current value of an option, or `None` when absent.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Current boolean value of an option, or `None` when absent or
    /// non-boolean.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(OptionValue::as_bool)
    }

    /// Whether the option is an offered choice at all.
    pub fn is_declared(&self, name: &str) -> bool {
        self.domains.contains_key(name)
    }

    /// Remove the selected value, keeping the option declared. Idempotent.
    pub fn unset(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// Remove the option from the schema and the mapping. Idempotent.
    pub fn remove(&mut self, name: &str) {
        self.domains.remove(name);
        self.values.remove(name);
    }

    /// Iterate over the current selections in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options with a current selection.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no option has a current selection.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
