//! Schemaless attribute values.
//!
//! Element data, style rules and extension options are open string-keyed maps
//! whose shape is decided by client code, so they are modeled with a small
//! variant type rather than fixed structs.
//!
//! # Overview
//!
//! - [`Value`]: null, bool, number, string, list or nested map.
//! - [`Attributes`]: insertion-ordered `String -> Value` map.
//! - [`Position`]: insertion-ordered `String -> f64` map (`x`, `y`, ...).
//!
//! Values are owned; cloning one is a deep copy, which is what gives element
//! getters and setters their copy-in/copy-out behavior.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Largest magnitude below which every integral `f64` is exact (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// An ordered map of named attribute values.
pub type Attributes = IndexMap<String, Value>;

/// An ordered map of named coordinates.
pub type Position = IndexMap<String, f64>;

/// A dynamically shaped attribute value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(Attributes),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Attributes> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Reads a map value as a [`Position`], keeping only numeric entries.
    pub fn to_position(&self) -> Option<Position> {
        self.as_map().map(|map| {
            map.iter()
                .filter_map(|(key, value)| value.as_f64().map(|n| (key.clone(), n)))
                .collect()
        })
    }

    /// Returns the key form of a scalar value.
    ///
    /// Strings are returned as-is, integral numbers without a fraction and
    /// booleans by name. Null, lists and maps have no key form. Numbers
    /// outside the exactly representable integer range keep their own
    /// decimal text, so distinct numbers never share a key.
    pub fn to_key(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                Some(format!("{}", *n as i64))
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Attributes> for Value {
    fn from(map: Attributes) -> Self {
        Self::Map(map)
    }
}

impl From<Position> for Value {
    fn from(position: Position) -> Self {
        Self::Map(
            position
                .into_iter()
                .map(|(key, n)| (key, Value::Number(n)))
                .collect(),
        )
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn finite_number_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            (-1_000_000i64..1_000_000).prop_map(|n| n as f64),
            prop::num::f64::NORMAL | prop::num::f64::ZERO,
        ]
    }

    /// Values whose numbers are integral, so their JSON text is exact.
    fn value_strategy() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1_000_000i32..1_000_000).prop_map(Value::from),
            "[a-z0-9 ]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                    .prop_map(|entries| Value::Map(entries.into_iter().collect())),
            ]
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The key of a number parses back to the same number.
    fn check_number_key_parses_back(n: f64) -> Result<(), TestCaseError> {
        let key = Value::from(n).to_key().expect("numbers have a key form");
        let parsed: f64 = key
            .parse()
            .map_err(|_| TestCaseError::fail(format!("key {key:?} is not a number")))?;
        prop_assert_eq!(parsed, n);
        Ok(())
    }

    fn check_json_round_trip(value: Value) -> Result<(), TestCaseError> {
        let text = serde_json::to_string(&value)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let parsed: Value =
            serde_json::from_str(&text).map_err(|err| TestCaseError::fail(err.to_string()))?;
        prop_assert_eq!(parsed, value);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn number_key_parses_back(n in finite_number_strategy()) {
            check_number_key_parses_back(n)?;
        }

        #[test]
        fn json_round_trip(value in value_strategy()) {
            check_json_round_trip(value)?;
        }
    }
}
