//! Terms query - match any of a set of exact values

use super::leaf::{LeafKind, LeafQuery};
use crate::query::ast::Query;
use crate::query::types::ParamValue;

impl Query {
    /// Documents whose `field` contains any of `values`
    ///
    /// `values` is expected to be a list but is written out as given.
    /// `boost` is written only when it is greater than zero.
    pub fn terms(field: impl Into<String>, values: impl ParamValue, boost: f64) -> Query {
        Query::Leaf(LeafQuery::with_field(LeafKind::Terms, field, values).with_boost(boost))
    }
}
