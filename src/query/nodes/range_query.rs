//! Range query - matches field values within bounds

use super::leaf::{LeafKind, LeafQuery};
use crate::query::ast::Query;
use crate::query::types::{ParamValue, RangeBounds};
use serde_json::Value;

impl Query {
    /// Documents whose `field` lies within `[gte, lte]`
    ///
    /// A `None` bound is left out. Every other value is written, so zero and
    /// `null` are real bounds.
    ///
    /// ```json
    /// { "range": { "landed_at": { "gte": "2017-10-18T09:48:12Z", "lte": "2017-10-18T10:48:12Z" } } }
    /// ```
    pub fn range(field: impl Into<String>, gte: Option<Value>, lte: Option<Value>) -> Query {
        Query::range_bounds(field, RangeBounds::from_options(gte, lte))
    }

    /// Range query with both bounds set
    pub fn range_between(
        field: impl Into<String>,
        gte: impl ParamValue,
        lte: impl ParamValue,
    ) -> Query {
        Query::range_bounds(field, RangeBounds::new().gte(gte).lte(lte))
    }

    /// Range query from prepared bounds
    ///
    /// Serialization fails if a bound was given a NaN or infinite number.
    pub fn range_bounds(field: impl Into<String>, bounds: RangeBounds) -> Query {
        let field = field.into();
        let unencodable = bounds.unencodable();
        let mut leaf = LeafQuery::with_field(
            LeafKind::Range,
            field.clone(),
            Value::Object(bounds.into_map()),
        );
        if let Some(bound) = unencodable {
            leaf.reject(format!("'{}' bound of '{}' is not a finite number", bound, field));
        }
        Query::Leaf(leaf)
    }
}
