//! Testing infrastructure for request documents
//!
//! This module checks serialized search requests against the structural rules
//! the engine expects, independent of how the document was built.
//!
//! # Quick Start
//!
//! ```rust
//! use squidex_dsl::testing::prelude::*;
//! use squidex_dsl::{Query, SearchRequest};
//!
//! let request = SearchRequest::new(Query::new().must([Query::exists("email")]));
//! let document = request.to_value().unwrap();
//!
//! let violations = check_all_invariants(&document, &default_invariants());
//! assert!(violations.is_empty());
//! ```
//!
//! # Invariants
//!
//! - **KnownRequestKeys**: only `query`, `sort`, `from`, `size`, `timeout`, none of them null
//! - **SingleKeyQueries**: every query object has exactly one key
//! - **KnownQueryTypes**: every query key is `bool`, `nested` or a leaf operator
//! - **EmptyClausesOmitted**: bool clause lists are never written empty
//! - **NestedFilterRequiresPath**: a sort's `nested_filter` comes with its `nested_path`

pub mod invariants;

pub use invariants::{
    check_all_invariants, collect_queries, default_invariants, EmptyClausesOmitted, Invariant,
    KnownQueryTypes, KnownRequestKeys, NestedFilterRequiresPath, SingleKeyQueries, Violation,
};

/// Prelude for easy imports
pub mod prelude {
    pub use super::invariants::{
        check_all_invariants, default_invariants, Invariant, Violation,
    };
}
