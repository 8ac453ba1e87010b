//! Builder for Elasticsearch-compatible search request documents.
//!
//! Queries are assembled from leaf predicates (`term`, `match`, `range`, ...),
//! nested wrappers and boolean combinators, then wrapped in a [`SearchRequest`]
//! together with sorting and pagination and serialized to JSON.
//!
//! ```
//! use squidex_dsl::{Query, SearchRequest, Sort};
//!
//! let request = SearchRequest::new(
//!     Query::term("form_id.keyword", "form1234", 0.0)
//!         .filter([Query::range_between("score", 10, 20)]),
//! )
//! .sort([Sort::by_field("submitted_at").map(Sort::desc)])
//! .set_page_size(25);
//!
//! let body = request.to_json().unwrap();
//! assert!(body.starts_with(r#"{"query":{"bool":{"filter":"#));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod testing;

pub use config::RequestConfig;
pub use error::{DslError, Result};
pub use models::{SearchRequest, Sort, SortMode, SortOrder};
pub use query::{
    BoolQuery, LeafKind, LeafQuery, MinimumShouldMatch, NestedQuery, Occur, ParamValue, Query,
    QueryParser, RangeBounds,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
