//! Nested query - evaluate a sub-query against nested objects

use crate::query::ast::Query;
use serde::Serialize;

/// Query executed against the nested objects under `path`, as if they were
/// indexed as separate documents
///
/// # Example
///
/// ```json
/// {
///   "nested": {
///     "path": "answers",
///     "query": {
///       "multi_match": { "query": "hello", "fields": ["answers.text"] }
///     }
///   }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NestedQuery {
    /// Path of the nested object field
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    /// Query evaluated in the nested context
    pub query: Box<Query>,
}

impl NestedQuery {
    /// Create a new nested query; takes ownership of the sub-query
    pub fn new(path: impl Into<String>, query: Query) -> Self {
        Self {
            path: path.into(),
            query: Box::new(query),
        }
    }

    /// Unwrap into the path and the owned sub-query
    pub fn into_parts(self) -> (String, Query) {
        (self.path, *self.query)
    }
}

impl From<NestedQuery> for Query {
    fn from(nested: NestedQuery) -> Self {
        Query::Nested(nested)
    }
}

impl Query {
    /// Wrap `query` so it is evaluated against the nested objects under `path`
    pub fn nested(path: impl Into<String>, query: Query) -> Query {
        Query::Nested(NestedQuery::new(path, query))
    }
}
