//! Leaf predicates - a single operator with an opaque parameter bag

use crate::query::ast::Query;
use crate::query::types::ParamValue;
use serde_json::{Map, Value};
use std::fmt;

/// Operator of a leaf predicate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Exists,
    Match,
    MatchPhrase,
    MultiMatch,
    Term,
    Terms,
    Range,
}

impl LeafKind {
    /// Every supported leaf operator
    pub const ALL: [LeafKind; 7] = [
        LeafKind::Exists,
        LeafKind::Match,
        LeafKind::MatchPhrase,
        LeafKind::MultiMatch,
        LeafKind::Term,
        LeafKind::Terms,
        LeafKind::Range,
    ];

    /// Operator name as it appears in the query document
    pub fn as_str(&self) -> &'static str {
        match self {
            LeafKind::Exists => "exists",
            LeafKind::Match => "match",
            LeafKind::MatchPhrase => "match_phrase",
            LeafKind::MultiMatch => "multi_match",
            LeafKind::Term => "term",
            LeafKind::Terms => "terms",
            LeafKind::Range => "range",
        }
    }

    /// Look up an operator by its query document name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-operator query condition
///
/// Serialized as `{ "<operator>": { ...params } }`. The parameter values are not
/// validated against any mapping and are written out verbatim.
///
/// A parameter that has no JSON form (a NaN or infinite number) is not stored;
/// the leaf remembers it and serializing the leaf fails.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafQuery {
    kind: LeafKind,
    params: Map<String, Value>,
    unencodable: Option<String>,
}

impl LeafQuery {
    /// Create a leaf predicate from an operator and its parameters
    pub fn new(kind: LeafKind, params: Map<String, Value>) -> Self {
        Self {
            kind,
            params,
            unencodable: None,
        }
    }

    /// Create a leaf predicate with a single `field: value` parameter
    pub(crate) fn with_field(
        kind: LeafKind,
        field: impl Into<String>,
        value: impl ParamValue,
    ) -> Self {
        let mut leaf = Self::new(kind, Map::new());
        leaf.insert_param(field, value);
        leaf
    }

    pub fn kind(&self) -> LeafKind {
        self.kind
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Get a single parameter
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Insert or replace a parameter
    pub fn insert_param(&mut self, key: impl Into<String>, value: impl ParamValue) {
        let key = key.into();
        match value.into_param() {
            Some(value) => {
                self.params.insert(key, value);
            }
            None => self.reject(format!("parameter '{}' is not a finite number", key)),
        }
    }

    /// Why this leaf cannot be serialized, if it cannot
    pub fn unencodable(&self) -> Option<&str> {
        self.unencodable.as_deref()
    }

    /// Mark the leaf as unserializable; the first reason is kept
    pub(crate) fn reject(&mut self, reason: String) {
        tracing::debug!(kind = self.kind.as_str(), %reason, "leaf parameter cannot be encoded");
        self.unencodable.get_or_insert(reason);
    }

    /// Set `boost`, leaving it out when it is not a positive number
    ///
    /// A boost of zero means "unset", not "boost to nothing".
    pub(crate) fn with_boost(mut self, boost: f64) -> Self {
        if boost.is_finite() && boost > 0.0 {
            self.insert_param("boost", boost);
        }
        self
    }

    pub fn into_parts(self) -> (LeafKind, Map<String, Value>) {
        (self.kind, self.params)
    }
}

impl From<LeafQuery> for Query {
    fn from(leaf: LeafQuery) -> Self {
        Query::Leaf(leaf)
    }
}

impl Query {
    /// Documents that have at least one non-null value in `field`
    ///
    /// ```json
    /// { "exists": { "field": "email" } }
    /// ```
    pub fn exists(field: impl Into<String>) -> Query {
        Query::Leaf(LeafQuery::with_field(
            LeafKind::Exists,
            "field",
            Value::String(field.into()),
        ))
    }
}
