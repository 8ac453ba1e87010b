//! Query DSL parser
//!
//! Parses a JSON query document back into a [`Query`] tree. Only the shapes the
//! builder can produce are accepted: `bool`, `nested` and the seven leaf
//! operators.

use crate::error::DslError;
use crate::query::ast::Query;
use crate::query::nodes::{BoolQuery, LeafKind, LeafQuery, NestedQuery};
use crate::query::types::{MinimumShouldMatch, Occur};
use crate::Result;
use serde_json::{Map, Value};

/// Query parser for JSON DSL
pub struct QueryParser;

impl QueryParser {
    /// Parse a JSON query into a query tree
    ///
    /// # Example
    ///
    /// ```json
    /// {
    ///   "bool": {
    ///     "must": [
    ///       { "term": { "form_id.keyword": "form1234" } }
    ///     ],
    ///     "filter": [
    ///       { "range": { "landed_at": { "gte": "2017-10-18T09:48:12Z" } } }
    ///     ]
    ///   }
    /// }
    /// ```
    ///
    /// A full request body is accepted too; only its `query` is read.
    pub fn parse(json: &Value) -> Result<Query> {
        Self::parse_query(json.get("query").unwrap_or(json))
    }

    /// Parse a JSON string into a query tree
    pub fn parse_str(json_str: &str) -> Result<Query> {
        let value: Value = serde_json::from_str(json_str)
            .map_err(|e| DslError::InvalidQuery(format!("Invalid JSON: {}", e)))?;
        Self::parse(&value)
    }

    fn parse_query(json: &Value) -> Result<Query> {
        match json {
            Value::Object(map) => Self::parse_query_object(map),
            _ => Err(DslError::InvalidQuery(
                "Query must be a JSON object".to_string(),
            )),
        }
    }

    fn parse_query_object(map: &Map<String, Value>) -> Result<Query> {
        let mut entries = map.iter();
        let (key, body) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(DslError::InvalidQuery(format!(
                    "Query object must have exactly one key. Got keys: {:?}",
                    map.keys().collect::<Vec<_>>()
                )))
            }
        };

        match key.as_str() {
            "bool" => Self::parse_bool(body),
            "nested" => Self::parse_nested(body),
            name => match LeafKind::from_name(name) {
                Some(kind) => Self::parse_leaf(kind, body),
                None => Err(DslError::InvalidQuery(format!(
                    "Unknown query type '{}'. Expected one of: bool, nested, exists, match, match_phrase, multi_match, term, terms, range",
                    name
                ))),
            },
        }
    }

    /// Parse a bool query
    fn parse_bool(value: &Value) -> Result<Query> {
        let map = value.as_object().ok_or_else(|| {
            DslError::InvalidQuery("bool query must be an object".to_string())
        })?;

        let mut query = BoolQuery::new();

        for occur in Occur::ALL {
            if let Some(clauses) = map.get(occur.as_str()) {
                *query.clauses_mut(occur) = Self::parse_clause_array(clauses)?;
            }
        }

        if let Some(msm) = map.get("minimum_should_match") {
            query.minimum_should_match = Some(Self::parse_minimum_should_match(msm)?);
        }

        if let Some(unknown) = map.keys().find(|key| !Self::is_bool_key(key)) {
            return Err(DslError::InvalidQuery(format!(
                "Unknown bool query key '{}'",
                unknown
            )));
        }

        Ok(Query::Bool(query))
    }

    fn is_bool_key(key: &str) -> bool {
        key == "minimum_should_match" || Occur::ALL.iter().any(|occur| occur.as_str() == key)
    }

    /// Parse an array of query clauses
    fn parse_clause_array(value: &Value) -> Result<Vec<Query>> {
        match value {
            Value::Array(arr) => arr.iter().map(Self::parse_query).collect(),
            // Single clause can be provided without array wrapper
            obj @ Value::Object(_) => Ok(vec![Self::parse_query(obj)?]),
            _ => Err(DslError::InvalidQuery(
                "Clause must be an array or object".to_string(),
            )),
        }
    }

    /// Parse minimum_should_match
    fn parse_minimum_should_match(value: &Value) -> Result<MinimumShouldMatch> {
        match value {
            Value::Number(n) => n.as_i64().map(MinimumShouldMatch::Count).ok_or_else(|| {
                DslError::InvalidQuery(format!("Invalid minimum_should_match: {}", n))
            }),
            Value::String(s) => Ok(MinimumShouldMatch::Expression(s.clone())),
            _ => Err(DslError::InvalidQuery(
                "minimum_should_match must be a number or string".to_string(),
            )),
        }
    }

    /// Parse a nested query
    fn parse_nested(value: &Value) -> Result<Query> {
        let map = value.as_object().ok_or_else(|| {
            DslError::InvalidQuery("nested query must be an object".to_string())
        })?;

        let path = match map.get("path") {
            Some(Value::String(path)) => path.clone(),
            None => String::new(),
            Some(_) => {
                return Err(DslError::InvalidQuery(
                    "nested query path must be a string".to_string(),
                ))
            }
        };

        let inner = map.get("query").ok_or_else(|| {
            DslError::InvalidQuery("nested query must have a 'query' field".to_string())
        })?;

        if let Some(unknown) = map.keys().find(|key| *key != "path" && *key != "query") {
            return Err(DslError::InvalidQuery(format!(
                "Unknown nested query key '{}'",
                unknown
            )));
        }

        Ok(Query::Nested(NestedQuery::new(path, Self::parse_query(inner)?)))
    }

    /// Parse a leaf predicate; parameters are kept verbatim
    fn parse_leaf(kind: LeafKind, value: &Value) -> Result<Query> {
        let params = value.as_object().ok_or_else(|| {
            DslError::InvalidQuery(format!("{} query must be an object", kind))
        })?;

        Ok(Query::Leaf(LeafQuery::new(kind, params.clone())))
    }
}
