//! Core types for the query builder

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Clause list of a bool query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occur {
    /// Clause must match and contributes to the score
    Must,
    /// Clause must not match; executed in filter context
    MustNot,
    /// Clause should match; governed by `minimum_should_match`
    Should,
    /// Clause must match; scoring is ignored
    Filter,
}

impl Occur {
    /// All clause lists, in serialization order
    pub const ALL: [Occur; 4] = [Occur::Must, Occur::MustNot, Occur::Should, Occur::Filter];

    /// Key of this clause list in the bool object
    pub fn as_str(&self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::MustNot => "must_not",
            Occur::Should => "should",
            Occur::Filter => "filter",
        }
    }
}

impl fmt::Display for Occur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum should match configuration
///
/// Passed through to the engine unchanged, so negative counts and combined
/// expressions such as `"3<90%"` are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MinimumShouldMatch {
    /// Exact count (negative values mean "all but n")
    Count(i64),
    /// Percentage (e.g., "75%") or combined expression
    Expression(String),
}

impl MinimumShouldMatch {
    /// JSON representation of this value
    pub fn to_value(&self) -> Value {
        match self {
            MinimumShouldMatch::Count(n) => Value::from(*n),
            MinimumShouldMatch::Expression(s) => Value::from(s.as_str()),
        }
    }
}

impl From<i32> for MinimumShouldMatch {
    fn from(n: i32) -> Self {
        MinimumShouldMatch::Count(n.into())
    }
}

impl From<i64> for MinimumShouldMatch {
    fn from(n: i64) -> Self {
        MinimumShouldMatch::Count(n)
    }
}

impl From<u32> for MinimumShouldMatch {
    fn from(n: u32) -> Self {
        MinimumShouldMatch::Count(n.into())
    }
}

impl From<&str> for MinimumShouldMatch {
    fn from(s: &str) -> Self {
        MinimumShouldMatch::Expression(s.to_string())
    }
}

impl From<String> for MinimumShouldMatch {
    fn from(s: String) -> Self {
        MinimumShouldMatch::Expression(s)
    }
}

/// A value that can be stored in a leaf's parameter bag
///
/// Conversion fails (`None`) for numbers JSON cannot carry, i.e. NaN and the
/// infinities. The failure is kept on the leaf and reported when the query
/// is serialized.
pub trait ParamValue {
    fn into_param(self) -> Option<Value>;
}

impl ParamValue for Value {
    fn into_param(self) -> Option<Value> {
        Some(self)
    }
}

macro_rules! impl_param_value {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                fn into_param(self) -> Option<Value> {
                    Some(Value::from(self))
                }
            }
        )*
    };
}

impl_param_value!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, String, &str);

impl ParamValue for f64 {
    fn into_param(self) -> Option<Value> {
        Number::from_f64(self).map(Value::Number)
    }
}

impl ParamValue for f32 {
    fn into_param(self) -> Option<Value> {
        f64::from(self).into_param()
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn into_param(self) -> Option<Value> {
        match self {
            Some(value) => value.into_param(),
            None => Some(Value::Null),
        }
    }
}

impl<T: ParamValue> ParamValue for Vec<T> {
    fn into_param(self) -> Option<Value> {
        self.into_iter()
            .map(ParamValue::into_param)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
    }
}

impl<T: ParamValue, const N: usize> ParamValue for [T; N] {
    fn into_param(self) -> Option<Value> {
        self.into_iter()
            .map(ParamValue::into_param)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
    }
}

/// Bounds of a range query
///
/// A bound is either absent (`None`) or present. Every present value is
/// written, including `0`, `""`, `false` and `null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeBounds {
    /// Greater than or equal to
    pub gte: Option<Value>,
    /// Less than or equal to
    pub lte: Option<Value>,
    /// Name of a bound that was given a non-finite number
    pub(crate) unencodable: Option<&'static str>,
}

impl RangeBounds {
    /// Create bounds with neither side set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bounds from optional values
    pub fn from_options(gte: Option<Value>, lte: Option<Value>) -> Self {
        Self {
            gte,
            lte,
            unencodable: None,
        }
    }

    /// Set the greater-than-or-equal bound
    pub fn gte(mut self, value: impl ParamValue) -> Self {
        match value.into_param() {
            Some(value) => self.gte = Some(value),
            None => {
                self.unencodable.get_or_insert("gte");
            }
        }
        self
    }

    /// Set the less-than-or-equal bound
    pub fn lte(mut self, value: impl ParamValue) -> Self {
        match value.into_param() {
            Some(value) => self.lte = Some(value),
            None => {
                self.unencodable.get_or_insert("lte");
            }
        }
        self
    }

    /// Whether neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.gte.is_none() && self.lte.is_none() && self.unencodable.is_none()
    }

    /// The bound that could not be encoded, if any
    pub fn unencodable(&self) -> Option<&'static str> {
        self.unencodable
    }

    /// Convert into the `{ "gte": .., "lte": .. }` object of a range query
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        for (key, bound) in [("gte", self.gte), ("lte", self.lte)] {
            if let Some(value) = bound {
                map.insert(key.to_string(), value);
            }
        }
        map
    }
}
