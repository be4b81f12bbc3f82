//! Keyword arguments passed through the dispatch seam
//!
//! Every generator receives the same [`Args`] bag and converts it into its
//! own typed parameter struct before drawing anything. Accessors reject
//! values of the wrong kind, and [`Args::ensure_only`] rejects keys a
//! consumer does not understand, so a typo never silently falls back to a
//! default.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::io::error::{Result, invalid_parameter};

/// Maps a 1-based point index to a signed pixel offset
pub type StepFn = Arc<dyn Fn(usize) -> i64 + Send + Sync>;

/// Wrap a closure as a [`StepFn`]
pub fn step(f: impl Fn(usize) -> i64 + Send + Sync + 'static) -> StepFn {
    Arc::new(f)
}

/// Constant offset regardless of point index
pub fn constant_step(offset: i64) -> StepFn {
    Arc::new(move |_| offset)
}

/// A single keyword argument value
#[derive(Clone)]
pub enum ArgValue {
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Flag
    Bool(bool),
    /// Integer pair, one value per axis
    Pair([i64; 2]),
    /// Free-form text
    Text(String),
    /// Step functions, one per axis
    Steps([StepFn; 2]),
}

impl ArgValue {
    /// Short name of the value kind for error messages
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Pair(_) => "pair",
            Self::Text(_) => "text",
            Self::Steps(_) => "step functions",
        }
    }

    /// Parse a command-line style value
    ///
    /// `true`/`false` become flags, `a,b` an integer pair, then integers,
    /// floats, and anything else text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Some((first, second)) = trimmed.split_once(',')
            && let (Ok(a), Ok(b)) = (first.trim().parse(), second.trim().parse())
        {
            return Self::Pair([a, b]);
        }
        if let Ok(value) = trimmed.parse() {
            return Self::Int(value);
        }
        if let Ok(value) = trimmed.parse() {
            return Self::Float(value);
        }
        Self::Text(trimmed.to_string())
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "Int({v})"),
            Self::Float(v) => write!(f, "Float({v})"),
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Pair([a, b]) => write!(f, "Pair({a}, {b})"),
            Self::Text(v) => write!(f, "Text({v:?})"),
            Self::Steps(_) => f.write_str("Steps(<fn>, <fn>)"),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Pair([a, b]) => write!(f, "({a}, {b})"),
            Self::Text(v) => f.write_str(v),
            Self::Steps(_) => f.write_str("(<fn>, <fn>)"),
        }
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<[i32; 2]> for ArgValue {
    fn from(value: [i32; 2]) -> Self {
        Self::Pair(value.map(i64::from))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<[i64; 2]> for ArgValue {
    fn from(value: [i64; 2]) -> Self {
        Self::Pair(value)
    }
}

impl From<(i64, i64)> for ArgValue {
    fn from((a, b): (i64, i64)) -> Self {
        Self::Pair([a, b])
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<[StepFn; 2]> for ArgValue {
    fn from(value: [StepFn; 2]) -> Self {
        Self::Steps(value)
    }
}

/// Named arguments for a phantom request
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: BTreeMap<String, ArgValue>,
}

impl Args {
    /// Empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, later values for a key replace earlier ones
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value for `key`
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.values.get(key)
    }

    /// Whether no arguments were given
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Reject any key not in `allowed`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first unexpected key
    pub fn ensure_only(&self, allowed: &[&str]) -> Result<()> {
        match self.keys().find(|key| !allowed.contains(key)) {
            Some(key) => Err(invalid_parameter(
                key,
                &self.values.get(key).map(ToString::to_string).unwrap_or_default(),
                &format!("unexpected argument, accepted: {}", allowed.join(", ")),
            )),
            None => Ok(()),
        }
    }

    /// Integer value of `key`, if present
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value is not an integer
    pub fn int(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(ArgValue::Int(v)) => Ok(Some(*v)),
            Some(other) => Err(wrong_kind(key, other, "an integer")),
        }
    }

    /// Flag value of `key`, if present
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value is not a bool
    pub fn flag(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(ArgValue::Bool(v)) => Ok(Some(*v)),
            Some(other) => Err(wrong_kind(key, other, "a bool")),
        }
    }

    /// Integer pair value of `key`, if present
    ///
    /// A single integer is accepted and applied to both axes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value is neither a pair nor an integer
    pub fn pair(&self, key: &str) -> Result<Option<[i64; 2]>> {
        match self.get(key) {
            None => Ok(None),
            Some(ArgValue::Pair(v)) => Ok(Some(*v)),
            Some(ArgValue::Int(v)) => Ok(Some([*v, *v])),
            Some(other) => Err(wrong_kind(key, other, "an integer pair")),
        }
    }

    /// Text value of `key`, if present
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value is not text
    pub fn text(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None => Ok(None),
            Some(ArgValue::Text(v)) => Ok(Some(v.as_str())),
            Some(other) => Err(wrong_kind(key, other, "text")),
        }
    }

    /// Step functions of `key`, if present
    ///
    /// A pair or single integer is turned into constant steps.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the value cannot be read as steps
    pub fn steps(&self, key: &str) -> Result<Option<[StepFn; 2]>> {
        match self.get(key) {
            None => Ok(None),
            Some(ArgValue::Steps(v)) => Ok(Some(v.clone())),
            Some(ArgValue::Pair([a, b])) => Ok(Some([constant_step(*a), constant_step(*b)])),
            Some(ArgValue::Int(v)) => Ok(Some([constant_step(*v), constant_step(*v)])),
            Some(other) => Err(wrong_kind(key, other, "step functions or an integer pair")),
        }
    }
}

fn wrong_kind(key: &str, value: &ArgValue, expected: &str) -> crate::io::error::PhantomError {
    invalid_parameter(
        key,
        value,
        &format!("expected {expected}, got {}", value.kind()),
    )
}

/// Convert a signed value to a count that must be at least `minimum`
///
/// # Errors
///
/// Returns `InvalidParameter` naming `parameter` if the value is below
/// `minimum`
pub fn to_count(parameter: &str, value: i64, minimum: usize) -> Result<usize> {
    match usize::try_from(value) {
        Ok(count) if count >= minimum => Ok(count),
        _ => Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be >= {minimum}"),
        )),
    }
}

/// Per-axis [`to_count`]
///
/// # Errors
///
/// Returns `InvalidParameter` naming `parameter` if either component is
/// below `minimum`
pub fn to_counts(parameter: &str, value: [i64; 2], minimum: usize) -> Result<[usize; 2]> {
    let [a, b] = value;
    match (usize::try_from(a), usize::try_from(b)) {
        (Ok(a), Ok(b)) if a >= minimum && b >= minimum => Ok([a, b]),
        _ => Err(invalid_parameter(
            parameter,
            &format!("({a}, {b})"),
            &format!("each component must be >= {minimum}"),
        )),
    }
}
