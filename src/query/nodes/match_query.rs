//! Match queries - full-text search on one or several fields

use super::leaf::{LeafKind, LeafQuery};
use crate::query::ast::Query;
use crate::query::types::ParamValue;
use serde_json::{Map, Value};

impl Query {
    /// Full-text match of `value` against `field`
    ///
    /// Accepts text, numbers, dates or booleans; the engine analyzes the value.
    pub fn match_query(field: impl Into<String>, value: impl ParamValue) -> Query {
        Query::Leaf(LeafQuery::with_field(LeafKind::Match, field, value))
    }

    /// Match `value` against several fields at once
    ///
    /// `fields` is always written, even when empty.
    ///
    /// ```json
    /// { "multi_match": { "query": "hello world", "fields": ["answers.text", "answers.url"] } }
    /// ```
    pub fn multi_match<I, S>(value: impl ParamValue, fields: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<Value> = fields
            .into_iter()
            .map(|field| Value::String(field.into()))
            .collect();

        let mut leaf = LeafQuery::new(LeafKind::MultiMatch, Map::new());
        leaf.insert_param("query", value);
        leaf.insert_param("fields", Value::Array(fields));
        Query::Leaf(leaf)
    }
}
