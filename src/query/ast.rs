//! Query tree representation
//!
//! This module defines [`Query`], the node type of the query tree. A node holds
//! exactly one shape at a time and changes shape as clauses are combined:
//!
//! - `Empty` until the first combinator call
//! - `Leaf` after a leaf constructor such as [`Query::term`]
//! - `Nested` after [`Query::nested`]
//! - `Bool` after any of [`Query::must`], [`Query::must_not`], [`Query::should`]
//!   or [`Query::filter`]

use crate::error::Result;
use crate::query::nodes::{BoolQuery, LeafQuery, NestedQuery};
use crate::query::types::{MinimumShouldMatch, Occur};
use serde::ser::{self, Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A node of the query tree
///
/// Every node owns its children. Combinators consume the receiver and return
/// the reshaped node, so a sub-query cannot be mutated after it has been
/// embedded in a parent.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Query {
    /// No shape yet; serializes as `{"bool":{}}`
    #[default]
    Empty,
    /// Single-operator predicate
    Leaf(LeafQuery),
    /// Sub-query scoped to a nested-object path
    Nested(NestedQuery),
    /// Boolean combination of clauses
    Bool(BoolQuery),
}

impl Query {
    /// Create an empty query, used as the outer frame for sub-queries
    pub fn new() -> Self {
        Query::Empty
    }

    /// Get the query type name for debugging and logging
    ///
    /// This is also the single key the node serializes under, except for
    /// `Empty` which is written as `bool`.
    pub fn query_type(&self) -> &'static str {
        match self {
            Query::Empty => "empty",
            Query::Leaf(leaf) => leaf.kind().as_str(),
            Query::Nested(_) => "nested",
            Query::Bool(_) => "bool",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Query::Empty)
    }

    pub fn as_leaf(&self) -> Option<&LeafQuery> {
        match self {
            Query::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&NestedQuery> {
        match self {
            Query::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&BoolQuery> {
        match self {
            Query::Bool(bool_query) => Some(bool_query),
            _ => None,
        }
    }

    /// Clauses that must appear in matching documents and contribute to the score
    ///
    /// The result is always a bool query. If `self` is a leaf or nested query it
    /// becomes the first `must` clause.
    pub fn must(self, clauses: impl IntoIterator<Item = Query>) -> Query {
        self.combine(Occur::Must, clauses)
    }

    /// Clauses that must not appear in matching documents
    ///
    /// Executed in filter context: scoring is ignored and clauses may be cached.
    /// If `self` is a leaf or nested query it becomes the first `must_not` clause.
    pub fn must_not(self, clauses: impl IntoIterator<Item = Query>) -> Query {
        self.combine(Occur::MustNot, clauses)
    }

    /// Clauses that should appear in matching documents
    ///
    /// Without a `must` or `filter` clause at least one should clause has to
    /// match; see [`Query::minimum_should_match`]. If `self` is a leaf or nested
    /// query it becomes the first `should` clause.
    pub fn should(self, clauses: impl IntoIterator<Item = Query>) -> Query {
        self.combine(Occur::Should, clauses)
    }

    /// Clauses that must appear in matching documents, without scoring
    ///
    /// If `self` is a leaf or nested query it becomes the first `filter` clause.
    pub fn filter(self, clauses: impl IntoIterator<Item = Query>) -> Query {
        self.combine(Occur::Filter, clauses)
    }

    /// Append `clauses` to the `occur` list, turning `self` into a bool query
    ///
    /// A leaf or nested payload is promoted only once: into the list of the first
    /// combinator that reshapes the node. Later calls find a bool query and just
    /// append, so `leaf.filter([y]).must([x])` keeps the leaf under `filter`.
    pub fn combine(self, occur: Occur, clauses: impl IntoIterator<Item = Query>) -> Query {
        let mut bool_query = match self {
            Query::Bool(bool_query) => bool_query,
            Query::Empty => BoolQuery::new(),
            payload @ (Query::Leaf(_) | Query::Nested(_)) => {
                tracing::trace!(
                    query_type = payload.query_type(),
                    occur = occur.as_str(),
                    "promoting query into bool clause"
                );
                let mut bool_query = BoolQuery::new();
                bool_query.push(occur, payload);
                bool_query
            }
        };

        bool_query.clauses_mut(occur).extend(clauses);
        Query::Bool(bool_query)
    }

    /// Control how many should clauses a document has to match
    ///
    /// Accepts a count, a percentage string or a combined expression.
    /// On a leaf the value is stored in the leaf's parameters; on an empty query
    /// it starts a bool query; on a nested query it has no effect.
    pub fn minimum_should_match(self, value: impl Into<MinimumShouldMatch>) -> Query {
        let value = value.into();
        match self {
            Query::Leaf(mut leaf) => {
                leaf.insert_param("minimum_should_match", value.to_value());
                Query::Leaf(leaf)
            }
            Query::Bool(bool_query) => Query::Bool(bool_query.with_minimum_should_match(value)),
            Query::Empty => Query::Bool(BoolQuery::new().with_minimum_should_match(value)),
            Query::Nested(nested) => {
                tracing::warn!(
                    path = %nested.path,
                    "minimum_should_match has no effect on a nested query"
                );
                Query::Nested(nested)
            }
        }
    }

    /// Serialize into a JSON value
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize into a compact JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if let Query::Leaf(leaf) = self {
            if let Some(reason) = leaf.unencodable() {
                return Err(ser::Error::custom(format!("{} query: {}", leaf.kind(), reason)));
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Query::Empty => map.serialize_entry("bool", &BoolQuery::new())?,
            Query::Leaf(leaf) => map.serialize_entry(leaf.kind().as_str(), leaf.params())?,
            Query::Nested(nested) => map.serialize_entry("nested", nested)?,
            Query::Bool(bool_query) => map.serialize_entry("bool", bool_query)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form_term() -> Query {
        Query::term("form_id.keyword", "form1234", 0.0)
    }

    #[test]
    fn test_empty_query() {
        let query = Query::new();
        assert!(query.is_empty());
        assert_eq!(query.query_type(), "empty");
        assert_eq!(query.to_json().unwrap(), r#"{"bool":{}}"#);
    }

    #[test]
    fn test_must_without_clauses_on_empty() {
        let query = Query::new().must(Vec::new());
        assert_eq!(query.query_type(), "bool");
        assert_eq!(query.to_json().unwrap(), r#"{"bool":{}}"#);
    }

    #[test]
    fn test_must_on_empty_frame() {
        let query = Query::new().must([form_term()]);
        assert_eq!(
            query.to_value().unwrap(),
            json!({ "bool": { "must": [{ "term": { "form_id.keyword": "form1234" } }] } })
        );
    }

    #[test]
    fn test_leaf_promoted_into_must() {
        let query = form_term().must([Query::match_query("content", "rust")]);
        assert_eq!(
            query.to_value().unwrap(),
            json!({
                "bool": {
                    "must": [
                        { "term": { "form_id.keyword": "form1234" } },
                        { "match": { "content": "rust" } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_nested_promoted_into_should() {
        let query = Query::nested("answers", Query::exists("answers.text"))
            .should([Query::match_query("_all", "hello")]);
        let bool_query = query.as_bool().unwrap();

        assert_eq!(bool_query.should.len(), 2);
        assert_eq!(bool_query.should[0].query_type(), "nested");
        assert_eq!(bool_query.should[1].query_type(), "match");
    }

    #[test]
    fn test_each_combinator_targets_its_list() {
        for occur in Occur::ALL {
            let query = Query::exists("a").combine(occur, [Query::exists("b")]);
            let bool_query = query.as_bool().unwrap();
            assert_eq!(bool_query.clauses(occur).len(), 2);
            assert_eq!(bool_query.clause_count(), 2);
        }
    }

    #[test]
    fn test_repeated_combinator_accumulates() {
        let query = Query::new()
            .must([Query::exists("a")])
            .must([Query::exists("b"), Query::exists("c")]);
        assert_eq!(query.as_bool().unwrap().must.len(), 3);
    }

    #[test]
    fn test_promotion_happens_once() {
        let x = Query::exists("x");
        let y = Query::exists("y");

        let query = form_term().filter([y]).must([x]);
        assert_eq!(
            query.to_value().unwrap(),
            json!({
                "bool": {
                    "must": [{ "exists": { "field": "x" } }],
                    "filter": [
                        { "term": { "form_id.keyword": "form1234" } },
                        { "exists": { "field": "y" } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_minimum_should_match_on_bool() {
        let query = Query::new()
            .should([Query::match_query("a", "x"), Query::match_query("b", "y")])
            .minimum_should_match(1);
        assert_eq!(
            query.to_value().unwrap()["bool"]["minimum_should_match"],
            json!(1)
        );

        let query = query.minimum_should_match("50%");
        assert_eq!(
            query.to_value().unwrap()["bool"]["minimum_should_match"],
            json!("50%")
        );
    }

    #[test]
    fn test_minimum_should_match_on_leaf() {
        let query = Query::match_query("content", "rust programming").minimum_should_match(2);
        assert_eq!(
            query.to_value().unwrap(),
            json!({ "match": { "content": "rust programming", "minimum_should_match": 2 } })
        );
    }

    #[test]
    fn test_minimum_should_match_on_empty_starts_bool() {
        let query = Query::new().minimum_should_match(1);
        assert_eq!(query.to_json().unwrap(), r#"{"bool":{"minimum_should_match":1}}"#);
    }

    #[test]
    fn test_minimum_should_match_on_nested_is_ignored() {
        let nested = Query::nested("answers", Query::exists("answers.text"));
        let query = nested.clone().minimum_should_match(1);
        assert_eq!(query, nested);
    }

    #[test]
    fn test_leaf_keeps_single_key() {
        let leaves = vec![
            Query::exists("f"),
            Query::match_query("f", "v"),
            Query::match_phrase("f", "v w"),
            Query::multi_match("v", ["f", "g"]),
            Query::term("f", "v", 1.0),
            Query::terms("f", vec!["v"], 0.0),
            Query::range_between("f", 1, 2),
        ];

        for leaf in leaves {
            let value = leaf.to_value().unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert!(object.contains_key(leaf.query_type()));
        }
    }

    #[test]
    fn test_unencodable_leaf_fails_anywhere_in_tree() {
        let query = Query::new()
            .must([form_term()])
            .filter([Query::nested("answers", Query::match_query("answers.number", f64::NAN))]);

        let err = query.to_json().unwrap_err();
        assert!(err.to_string().contains("match query: parameter 'answers.number'"));
        assert!(query.to_value().is_err());
    }

    #[test]
    fn test_accessors() {
        assert!(form_term().as_leaf().is_some());
        assert!(form_term().as_bool().is_none());
        assert!(Query::nested("p", Query::new()).as_nested().is_some());
        assert!(Query::new().must(Vec::new()).as_bool().unwrap().is_empty());
    }
}
