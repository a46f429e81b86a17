//! Argument kinds and decoded argument values
//!
//! A command signature is a list of [`ArgKind`]s. Dispatching a line produces
//! one [`Value`] per signature entry, collected into an immutable [`Arguments`].

use crate::error::{CommandError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of primitive types a command may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgKind {
    String,
    Boolean,
    Int32,
    Int64,
    Single,
    Double,
}

impl ArgKind {
    /// Type name used in error messages and signature listings
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Single => "Single",
            Self::Double => "Double",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single decoded argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Single(f32),
    Double(f64),
}

impl Value {
    /// Kind of this value
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::String(_) => ArgKind::String,
            Self::Boolean(_) => ArgKind::Boolean,
            Self::Int32(_) => ArgKind::Int32,
            Self::Int64(_) => ArgKind::Int64,
            Self::Single(_) => ArgKind::Single,
            Self::Double(_) => ArgKind::Double,
        }
    }
}

/// Canonical text form. Numbers and booleans print in a form the tokenizer
/// reads back to the same value; strings print raw.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int32(n) => write!(f, "{n}"),
            Self::Int64(n) => write!(f, "{n}"),
            Self::Single(n) => write!(f, "{n}"),
            Self::Double(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Single(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

/// Ordered, read-only sequence of decoded arguments handed to a handler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<Value>,
}

impl Arguments {
    /// Start building an argument sequence
    pub fn builder() -> ArgumentsBuilder {
        ArgumentsBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Get the string argument at `index`
    pub fn string(&self, index: usize) -> Result<&str> {
        match self.values.get(index) {
            Some(Value::String(s)) => Ok(s),
            other => Err(self.mismatch(index, ArgKind::String, other)),
        }
    }

    /// Get the boolean argument at `index`
    pub fn boolean(&self, index: usize) -> Result<bool> {
        match self.values.get(index) {
            Some(Value::Boolean(b)) => Ok(*b),
            other => Err(self.mismatch(index, ArgKind::Boolean, other)),
        }
    }

    /// Get the 32-bit integer argument at `index`
    pub fn int32(&self, index: usize) -> Result<i32> {
        match self.values.get(index) {
            Some(Value::Int32(n)) => Ok(*n),
            other => Err(self.mismatch(index, ArgKind::Int32, other)),
        }
    }

    /// Get the 64-bit integer argument at `index`
    pub fn int64(&self, index: usize) -> Result<i64> {
        match self.values.get(index) {
            Some(Value::Int64(n)) => Ok(*n),
            other => Err(self.mismatch(index, ArgKind::Int64, other)),
        }
    }

    /// Get the 32-bit float argument at `index`
    pub fn single(&self, index: usize) -> Result<f32> {
        match self.values.get(index) {
            Some(Value::Single(n)) => Ok(*n),
            other => Err(self.mismatch(index, ArgKind::Single, other)),
        }
    }

    /// Get the 64-bit float argument at `index`
    pub fn double(&self, index: usize) -> Result<f64> {
        match self.values.get(index) {
            Some(Value::Double(n)) => Ok(*n),
            other => Err(self.mismatch(index, ArgKind::Double, other)),
        }
    }

    fn mismatch(&self, index: usize, expected: ArgKind, found: Option<&Value>) -> CommandError {
        CommandError::argument_access(
            index,
            expected.name(),
            found.map(|v| v.kind().name().to_string()),
        )
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Collects values during dispatch; `finish` hands out the immutable sequence
#[derive(Debug, Default)]
pub struct ArgumentsBuilder {
    values: Vec<Value>,
}

impl ArgumentsBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    pub fn finish(self) -> Arguments {
        Arguments {
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arguments {
        let mut builder = Arguments::builder();
        builder.push("yeah").push(false).push(20);
        builder.finish()
    }

    #[test]
    fn test_typed_access() {
        let args = sample();
        assert_eq!(args.len(), 3);
        assert_eq!(args.string(0).unwrap(), "yeah");
        assert!(!args.boolean(1).unwrap());
        assert_eq!(args.int32(2).unwrap(), 20);
    }

    #[test]
    fn test_access_with_wrong_kind() {
        let args = sample();
        let err = args.int64(2).unwrap_err();
        match err {
            CommandError::ArgumentAccess {
                index,
                expected,
                found,
            } => {
                assert_eq!(index, 2);
                assert_eq!(expected, "Int64");
                assert_eq!(found.as_deref(), Some("Int32"));
            }
            other => panic!("Expected ArgumentAccess, got {other:?}"),
        }
    }

    #[test]
    fn test_access_out_of_range() {
        let args = sample();
        let err = args.double(7).unwrap_err();
        assert!(matches!(
            err,
            CommandError::ArgumentAccess { index: 7, found: None, .. }
        ));
    }

    #[test]
    fn test_value_kind_and_display() {
        assert_eq!(Value::from(1.5f32).kind(), ArgKind::Single);
        assert_eq!(Value::from(-3i64).to_string(), "-3");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("a b").to_string(), "a b");
        assert_eq!(ArgKind::Double.to_string(), "Double");
    }
}
