//! Boolean query - combines multiple clauses with AND, OR, NOT semantics

use crate::query::ast::Query;
use crate::query::types::{MinimumShouldMatch, Occur};
use serde::Serialize;

/// Boolean query combining multiple clauses
///
/// The boolean query supports four types of clauses:
/// - `must`: All clauses must match (AND). Contributes to score.
/// - `must_not`: No clause must match (NOT). Does not contribute to score.
/// - `should`: At least one clause should match (OR). Contributes to score.
/// - `filter`: All clauses must match (AND). Does not contribute to score. Cached.
///
/// Empty clause lists and an unset `minimum_should_match` are left out of the
/// serialized object, so an empty bool query is written as `{"bool":{}}`.
///
/// # Example
///
/// ```json
/// {
///   "bool": {
///     "must": [
///       { "term": { "form_id.keyword": "form1234" } }
///     ],
///     "should": [
///       { "match": { "_all": "hello world" } }
///     ],
///     "minimum_should_match": 1
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    /// Clauses that must match (AND, scoring)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Query>,
    /// Clauses that must not match (NOT, no scoring)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Query>,
    /// Clauses where at least one should match (OR, scoring)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Query>,
    /// Clauses that must match (AND, no scoring, cached)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Query>,
    /// Minimum number of should clauses that must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<MinimumShouldMatch>,
}

impl BoolQuery {
    /// Create a new empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// Clauses of one list
    pub fn clauses(&self, occur: Occur) -> &[Query] {
        match occur {
            Occur::Must => &self.must,
            Occur::MustNot => &self.must_not,
            Occur::Should => &self.should,
            Occur::Filter => &self.filter,
        }
    }

    /// Mutable access to one clause list
    pub fn clauses_mut(&mut self, occur: Occur) -> &mut Vec<Query> {
        match occur {
            Occur::Must => &mut self.must,
            Occur::MustNot => &mut self.must_not,
            Occur::Should => &mut self.should,
            Occur::Filter => &mut self.filter,
        }
    }

    /// Append a clause to one list
    pub fn push(&mut self, occur: Occur, query: Query) {
        self.clauses_mut(occur).push(query);
    }

    /// Set minimum should match
    pub fn with_minimum_should_match(mut self, msm: impl Into<MinimumShouldMatch>) -> Self {
        self.minimum_should_match = Some(msm.into());
        self
    }

    /// Total number of clauses across all lists
    pub fn clause_count(&self) -> usize {
        Occur::ALL.iter().map(|occur| self.clauses(*occur).len()).sum()
    }

    /// Whether the query would serialize as `{"bool":{}}`
    pub fn is_empty(&self) -> bool {
        self.clause_count() == 0 && self.minimum_should_match.is_none()
    }
}

impl From<BoolQuery> for Query {
    fn from(bool_query: BoolQuery) -> Self {
        Query::Bool(bool_query)
    }
}
