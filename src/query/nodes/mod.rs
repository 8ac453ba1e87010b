//! Concrete query node implementations
//!
//! Leaf predicates share one representation ([`LeafQuery`]: an operator plus an
//! opaque parameter bag); each file adds the `Query` constructors for its
//! operator.

mod bool_query;
mod leaf;
mod match_query;
mod nested_query;
mod phrase_query;
mod range_query;
mod term_query;
mod terms_query;

pub use bool_query::BoolQuery;
pub use leaf::{LeafKind, LeafQuery};
pub use nested_query::NestedQuery;
