//! Named variable assignments handed to `prove` and `verify`.

use crate::error::{Error, Result};
use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A curve-agnostic assigned value.
///
/// Each backend reduces it into its own scalar field, so the same value can be
/// used against any curve. Numbers that do not fit an `i64` are given as decimal
/// strings, optionally prefixed with `-`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Decimal(String),
}

impl Value {
    pub fn to_field<F: PrimeField>(&self) -> Option<F> {
        match self {
            Value::Int(i) => {
                let magnitude = F::from(i.unsigned_abs());
                Some(if *i < 0 { -magnitude } else { magnitude })
            }
            Value::Decimal(s) => {
                let s = s.trim();
                let (negative, digits) = match s.strip_prefix('-') {
                    Some(digits) => (true, digits),
                    None => (false, s),
                };
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let digits = digits.trim_start_matches('0');
                let magnitude = if digits.is_empty() {
                    F::ZERO
                } else {
                    F::from_str(digits).ok()?
                };
                Some(if negative { -magnitude } else { magnitude })
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Decimal(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => Value::Int(value),
            Err(_) => Value::Decimal(value.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Decimal(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Decimal(value)
    }
}

/// Maps variable names to their assigned values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution(BTreeMap<String, Value>);

impl Solution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object such as `{"a": 3, "b": "-4"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Looks up `name` and reduces it into `F`.
    pub(crate) fn field_value<F: PrimeField>(&self, name: &str) -> Result<F> {
        let value = self
            .get(name)
            .ok_or_else(|| Error::MissingAssignment(name.to_string()))?;
        value.to_field().ok_or_else(|| Error::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

impl<K, V> FromIterator<(K, V)> for Solution
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Solution(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{Fp64, MontBackend};

    #[derive(ark_ff::MontConfig)]
    #[modulus = "641"]
    #[generator = "3"]
    struct FieldConfig;
    type Field = Fp64<MontBackend<FieldConfig, 1>>;

    #[test]
    fn integers_reduce_into_the_field() {
        assert_eq!(Value::from(12).to_field::<Field>(), Some(Field::from(12u64)));
        assert_eq!(Value::from(642).to_field::<Field>(), Some(Field::from(1u64)));
        assert_eq!(Value::from(-1).to_field::<Field>(), Some(Field::from(640u64)));
        assert_eq!(
            Value::Int(i64::MIN).to_field::<Field>(),
            Some(-Field::from(i64::MIN.unsigned_abs()))
        );
    }

    #[test]
    fn decimal_strings_reduce_into_the_field() {
        assert_eq!(Value::from("640").to_field::<Field>(), Some(Field::from(640u64)));
        assert_eq!(Value::from("-3").to_field::<Field>(), Some(-Field::from(3u64)));
        assert_eq!(Value::from(" 007 ").to_field::<Field>(), Some(Field::from(7u64)));
        assert_eq!(Value::from("000").to_field::<Field>(), Some(Field::from(0u64)));
        assert_eq!(Value::from(u64::MAX), Value::Decimal(u64::MAX.to_string()));
    }

    #[test]
    fn malformed_values_are_rejected() {
        for bad in ["", "-", "0x10", "1.5", "twelve", "--1"] {
            assert_eq!(Value::from(bad).to_field::<Field>(), None, "{bad:?}");
        }
    }

    #[test]
    fn solution_from_json() -> Result<()> {
        let solution = Solution::from_json(r#"{"a": 3, "b": "4", "c": -12}"#)?;
        assert_eq!(solution.len(), 3);
        assert_eq!(solution.get("a"), Some(&Value::Int(3)));
        assert_eq!(solution.get("b"), Some(&Value::Decimal("4".to_string())));
        assert_eq!(solution.field_value::<Field>("c")?, -Field::from(12u64));
        assert!(Solution::from_json("[1, 2]").is_err());
        Ok(())
    }

    #[test]
    fn field_value_reports_missing_and_invalid() {
        let solution: Solution = [("a", Value::from("nope"))].into_iter().collect();
        assert!(matches!(
            solution.field_value::<Field>("b"),
            Err(Error::MissingAssignment(name)) if name == "b"
        ));
        assert!(matches!(
            solution.field_value::<Field>("a"),
            Err(Error::InvalidValue { name, .. }) if name == "a"
        ));
    }

    #[test]
    fn read_solution_file() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("witness.json");
        std::fs::write(&path, r#"{"x": 1}"#).unwrap();
        assert_eq!(Solution::read(&path)?.get("x"), Some(&Value::Int(1)));
        assert!(matches!(
            Solution::read(dir.path().join("missing.json")),
            Err(Error::Io { .. })
        ));
        Ok(())
    }
}
