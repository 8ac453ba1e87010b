//! Invariant checking framework for serialized requests
//!
//! This module provides the trait and concrete implementations for checking
//! the shape of a search request document.

use crate::query::{LeafKind, Occur};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

const REQUEST_KEYS: [&str; 5] = ["query", "sort", "from", "size", "timeout"];

/// A violation of an invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub invariant: String,
    pub description: String,
    /// JSON pointer to the offending value
    pub path: String,
}

impl Violation {
    fn new(invariant: &str, path: &str, description: impl Into<String>) -> Self {
        Self {
            invariant: invariant.to_string(),
            description: description.into(),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INVARIANT VIOLATION: {}", self.invariant)?;
        writeln!(f, "  Description: {}", self.description)?;
        writeln!(f, "  Path: {}", self.path)
    }
}

/// Trait for invariant checkers
pub trait Invariant: Send + Sync {
    /// Name of the invariant
    fn name(&self) -> &str;

    /// Check the invariant against a serialized request
    fn check(&self, document: &Value) -> Result<(), Violation>;

    /// Human-readable description
    fn description(&self) -> &str {
        "No description provided"
    }
}

/// Check all invariants and return violations
pub fn check_all_invariants(document: &Value, invariants: &[Box<dyn Invariant>]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for invariant in invariants {
        if let Err(violation) = invariant.check(document) {
            violations.push(violation);
        }
    }

    violations
}

/// Get the default set of invariants
pub fn default_invariants() -> Vec<Box<dyn Invariant>> {
    vec![
        Box::new(KnownRequestKeys),
        Box::new(SingleKeyQueries),
        Box::new(KnownQueryTypes),
        Box::new(EmptyClausesOmitted),
        Box::new(NestedFilterRequiresPath),
    ]
}

/// Every query object in a request, with its JSON pointer
///
/// Covers the top-level query, bool clauses, nested sub-queries and sort
/// `nested_filter` queries, depth first.
pub fn collect_queries(document: &Value) -> Vec<(String, &Value)> {
    let mut queries = Vec::new();

    if let Some(query) = document.get("query") {
        collect_from(query, "/query".to_string(), &mut queries);
    }

    if let Some(Value::Array(sortings)) = document.get("sort") {
        for (i, (field, options)) in sort_options(sortings) {
            if let Some(filter) = options.get("nested_filter") {
                let path = format!("/sort/{}/{}/nested_filter", i, escape(field));
                collect_from(filter, path, &mut queries);
            }
        }
    }

    queries
}

fn collect_from<'a>(query: &'a Value, path: String, out: &mut Vec<(String, &'a Value)>) {
    out.push((path.clone(), query));

    if let Some(bool_body) = query.get("bool") {
        for occur in Occur::ALL {
            if let Some(Value::Array(clauses)) = bool_body.get(occur.as_str()) {
                for (i, clause) in clauses.iter().enumerate() {
                    collect_from(clause, format!("{}/bool/{}/{}", path, occur, i), out);
                }
            }
        }
    }

    if let Some(inner) = query.get("nested").and_then(|nested| nested.get("query")) {
        collect_from(inner, format!("{}/nested/query", path), out);
    }
}

fn sort_options(sortings: &[Value]) -> impl Iterator<Item = (usize, (&String, &Value))> {
    sortings.iter().enumerate().filter_map(|(i, entry)| {
        entry
            .as_object()
            .and_then(|object| object.iter().next())
            .map(|field_and_options| (i, field_and_options))
    })
}

fn escape(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

// ============================================================================
// CONCRETE INVARIANTS
// ============================================================================

/// Invariant: only the request keys the engine knows, never written as null
///
/// Unset fields are left out instead of being written as `null` or `[]`.
pub struct KnownRequestKeys;

impl Invariant for KnownRequestKeys {
    fn name(&self) -> &str {
        "KnownRequestKeys"
    }

    fn description(&self) -> &str {
        "A request has only query/sort/from/size/timeout keys, none of them null or empty"
    }

    fn check(&self, document: &Value) -> Result<(), Violation> {
        let object = document
            .as_object()
            .ok_or_else(|| Violation::new(self.name(), "", "request is not a JSON object"))?;

        for (key, value) in object {
            let path = format!("/{}", escape(key));
            if !REQUEST_KEYS.contains(&key.as_str()) {
                return Err(Violation::new(
                    self.name(),
                    &path,
                    format!("unknown request key '{}'", key),
                ));
            }
            if value.is_null() {
                return Err(Violation::new(self.name(), &path, "unset field written as null"));
            }
            if key == "sort" && value.as_array().map_or(true, |entries| entries.is_empty()) {
                return Err(Violation::new(
                    self.name(),
                    &path,
                    "sort must be a non-empty array when present",
                ));
            }
        }

        Ok(())
    }
}

/// Invariant: every query object has exactly one key
pub struct SingleKeyQueries;

impl Invariant for SingleKeyQueries {
    fn name(&self) -> &str {
        "SingleKeyQueries"
    }

    fn description(&self) -> &str {
        "Every query object holds exactly one query type"
    }

    fn check(&self, document: &Value) -> Result<(), Violation> {
        for (path, query) in collect_queries(document) {
            let keys = query.as_object().map(|object| object.len());
            if keys != Some(1) {
                return Err(Violation::new(
                    self.name(),
                    &path,
                    format!("query object has {:?} keys, expected exactly one", keys),
                ));
            }
        }
        Ok(())
    }
}

/// Invariant: query types are limited to bool, nested and the leaf operators
pub struct KnownQueryTypes;

impl Invariant for KnownQueryTypes {
    fn name(&self) -> &str {
        "KnownQueryTypes"
    }

    fn description(&self) -> &str {
        "Every query key is bool, nested or a supported leaf operator"
    }

    fn check(&self, document: &Value) -> Result<(), Violation> {
        for (path, query) in collect_queries(document) {
            let Some(object) = query.as_object() else {
                continue;
            };
            for key in object.keys() {
                let known = key == "bool" || key == "nested" || LeafKind::from_name(key).is_some();
                if !known {
                    return Err(Violation::new(
                        self.name(),
                        &path,
                        format!("unknown query type '{}'", key),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Invariant: bool clause lists are left out rather than written empty
pub struct EmptyClausesOmitted;

impl Invariant for EmptyClausesOmitted {
    fn name(&self) -> &str {
        "EmptyClausesOmitted"
    }

    fn description(&self) -> &str {
        "must/must_not/should/filter are absent or non-empty arrays"
    }

    fn check(&self, document: &Value) -> Result<(), Violation> {
        for (path, query) in collect_queries(document) {
            let Some(bool_body) = query.get("bool") else {
                continue;
            };
            for occur in Occur::ALL {
                match bool_body.get(occur.as_str()) {
                    None => {}
                    Some(Value::Array(clauses)) if !clauses.is_empty() => {}
                    Some(_) => {
                        return Err(Violation::new(
                            self.name(),
                            &format!("{}/bool/{}", path, occur),
                            "clause list must be a non-empty array when present",
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Invariant: a sort's nested filter only appears under a nested path
pub struct NestedFilterRequiresPath;

impl Invariant for NestedFilterRequiresPath {
    fn name(&self) -> &str {
        "NestedFilterRequiresPath"
    }

    fn description(&self) -> &str {
        "Sort entries carry nested_filter only together with nested_path"
    }

    fn check(&self, document: &Value) -> Result<(), Violation> {
        let Some(Value::Array(sortings)) = document.get("sort") else {
            return Ok(());
        };

        for (i, (field, options)) in sort_options(sortings) {
            if options.get("nested_filter").is_some() && options.get("nested_path").is_none() {
                return Err(Violation::new(
                    self.name(),
                    &format!("/sort/{}/{}", i, escape(field)),
                    format!("sort on '{}' has nested_filter without nested_path", field),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violations(document: Value) -> Vec<Violation> {
        check_all_invariants(&document, &default_invariants())
    }

    #[test]
    fn test_valid_document_has_no_violations() {
        let document = json!({
            "query": {
                "bool": {
                    "must": [{ "term": { "form_id.keyword": "form1234" } }],
                    "should": [
                        { "nested": { "path": "answers", "query": { "exists": { "field": "answers.text" } } } }
                    ],
                    "minimum_should_match": 1
                }
            },
            "sort": [
                { "answers.number": { "order": "desc", "nested_path": "answers", "nested_filter": { "term": { "answers.id": "x" } } } }
            ],
            "size": 25,
            "timeout": "10s"
        });
        assert!(violations(document).is_empty());
    }

    #[test]
    fn test_collect_queries_paths() {
        let document = json!({
            "query": {
                "bool": {
                    "filter": [
                        { "nested": { "path": "a", "query": { "exists": { "field": "a.b" } } } }
                    ]
                }
            },
            "sort": [{ "a/b": { "nested_path": "a", "nested_filter": { "exists": { "field": "a.c" } } } }]
        });

        let paths: Vec<String> = collect_queries(&document)
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "/query",
                "/query/bool/filter/0",
                "/query/bool/filter/0/nested/query",
                "/sort/0/a~1b/nested_filter",
            ]
        );
    }

    #[test]
    fn test_unknown_request_key() {
        let found = violations(json!({ "track_total_hits": true }));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].invariant, "KnownRequestKeys");
    }

    #[test]
    fn test_null_and_empty_sort() {
        let found = KnownRequestKeys.check(&json!({ "size": null })).unwrap_err();
        assert_eq!(found.path, "/size");

        let found = KnownRequestKeys.check(&json!({ "sort": [] })).unwrap_err();
        assert_eq!(found.path, "/sort");
    }

    #[test]
    fn test_multi_key_query() {
        let document = json!({
            "query": { "bool": { "must": [{ "term": { "a": 1 }, "match": { "b": 2 } }] } }
        });
        let found = SingleKeyQueries.check(&document).unwrap_err();
        assert_eq!(found.path, "/query/bool/must/0");
    }

    #[test]
    fn test_unknown_query_type() {
        let document = json!({ "query": { "wildcard": { "title": "prog*" } } });
        let found = KnownQueryTypes.check(&document).unwrap_err();
        assert!(found.description.contains("wildcard"));
    }

    #[test]
    fn test_empty_clause_list() {
        let document = json!({ "query": { "bool": { "must": [] } } });
        let found = EmptyClausesOmitted.check(&document).unwrap_err();
        assert_eq!(found.path, "/query/bool/must");
    }

    #[test]
    fn test_nested_filter_without_path() {
        let document = json!({
            "sort": [{ "price": { "nested_filter": { "exists": { "field": "price" } } } }]
        });
        let found = NestedFilterRequiresPath.check(&document).unwrap_err();
        assert_eq!(found.path, "/sort/0/price");
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new("SingleKeyQueries", "/query", "query object has 2 keys");
        let text = violation.to_string();
        assert!(text.contains("INVARIANT VIOLATION: SingleKeyQueries"));
        assert!(text.contains("Path: /query"));
    }
}
