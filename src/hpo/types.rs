use std::fmt;

use crate::error::{Error, Result};

/// A literal hyperparameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    /// Get as float (converts int to float if needed)
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            ParamValue::Float(v) => Some(v),
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Bool(_) => None,
        }
    }

    /// Get as int (accepts floats without a fractional part)
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            ParamValue::Int(v) => Some(v),
            ParamValue::Float(v) if v.fract() == 0.0 => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Read the value as a float for the parameter `name`
    pub fn require_float(&self, name: &str) -> Result<f64> {
        self.as_float().ok_or_else(|| invalid(name, "a number", self))
    }

    /// Read the value as a non-negative integer for the parameter `name`
    pub fn require_usize(&self, name: &str) -> Result<usize> {
        self.as_int()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| invalid(name, "a non-negative integer", self))
    }

    pub fn require_bool(&self, name: &str) -> Result<bool> {
        self.as_bool().ok_or_else(|| invalid(name, "a boolean", self))
    }
}

fn invalid(name: &str, expected: &str, got: &ParamValue) -> Error {
    Error::InvalidConfiguration {
        name: name.to_string(),
        reason: format!("Expected {expected}, got {got}."),
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

/// An ordered assignment of values to parameter names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `name`, replacing a previous assignment in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find_map(|(n, v)| (n.as_str() == name).then_some(v))
    }

    /// Iterate over assignments in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParamSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Hyperparameter search space
///
/// Maps parameter names to ordered candidate values. Both the order of the
/// names and the order of each candidate list are preserved, since they decide
/// which combination wins a tie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSpace {
    dims: Vec<(String, Vec<ParamValue>)>,
}

impl SearchSpace {
    /// Create an empty search space
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension, replacing the candidates of an existing one in place
    pub fn add<V>(&mut self, name: impl Into<String>, values: impl IntoIterator<Item = V>)
    where
        V: Into<ParamValue>,
    {
        let name = name.into();
        let values = values.into_iter().map(Into::into).collect();
        match self.dims.iter_mut().find(|(n, _)| *n == name) {
            Some((_, vs)) => *vs = values,
            None => self.dims.push((name, values)),
        }
    }

    /// Builder form of [`add`](Self::add)
    pub fn with<V>(mut self, name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<ParamValue>,
    {
        self.add(name, values);
        self
    }

    /// Iterate over dimensions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParamValue])> {
        self.dims.iter().map(|(n, vs)| (n.as_str(), vs.as_slice()))
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// **Errors** with [`Error::EmptySearchSpace`] naming the first dimension without candidates
    pub fn validate(&self) -> Result<()> {
        match self.dims.iter().find(|(_, vs)| vs.is_empty()) {
            Some((name, _)) => Err(Error::EmptySearchSpace(name.clone())),
            None => Ok(()),
        }
    }
}
