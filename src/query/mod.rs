//! Query DSL builder
//!
//! This module provides a structured builder for the Elasticsearch query language:
//! - Leaf predicates (term, terms, match, match_phrase, multi_match, range, exists)
//! - Nested queries scoped to a nested-object path
//! - Boolean queries (must, must_not, should, filter)
//!
//! A [`Query`] holds exactly one of these shapes and changes shape as clauses are
//! combined. A leaf that receives a `must` clause becomes a bool query whose first
//! `must` entry is the leaf it started from:
//!
//! ```json
//! {
//!   "bool": {
//!     "must": [
//!       { "term": { "form_id.keyword": "form1234" } },
//!       { "match": { "content": "rust" } }
//!     ]
//!   }
//! }
//! ```

pub mod ast;
pub mod nodes;
pub mod parser;
pub mod types;

pub use ast::Query;
pub use nodes::{BoolQuery, LeafKind, LeafQuery, NestedQuery};
pub use parser::QueryParser;
pub use types::{MinimumShouldMatch, Occur, ParamValue, RangeBounds};
