//! Term query - exact match on a field

use super::leaf::{LeafKind, LeafQuery};
use crate::query::ast::Query;
use crate::query::types::ParamValue;

impl Query {
    /// Documents that contain the exact `value` in `field`
    ///
    /// `boost` is written only when it is greater than zero. A NaN or infinite
    /// `value` makes serialization fail.
    ///
    /// ```json
    /// { "term": { "form_id.keyword": "form1234", "boost": 2.0 } }
    /// ```
    pub fn term(field: impl Into<String>, value: impl ParamValue, boost: f64) -> Query {
        Query::Leaf(LeafQuery::with_field(LeafKind::Term, field, value).with_boost(boost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_query() {
        let query = Query::term("form_id.keyword", "form1234", 0.0);
        assert_eq!(query.query_type(), "term");
        assert_eq!(
            query.to_value().unwrap(),
            json!({ "term": { "form_id.keyword": "form1234" } })
        );
    }

    #[test]
    fn test_term_zero_and_negative_boost_identical() {
        let zero = Query::term("status", "active", 0.0).to_json().unwrap();
        let negative = Query::term("status", "active", -1.0).to_json().unwrap();
        assert_eq!(zero, negative);
        assert!(!zero.contains("boost"));
    }

    #[test]
    fn test_term_with_boost() {
        let query = Query::term("status", "active", 2.5);
        assert_eq!(
            query.to_value().unwrap(),
            json!({ "term": { "status": "active", "boost": 2.5 } })
        );
    }

    #[test]
    fn test_term_accepts_any_value() {
        assert_eq!(
            Query::term("count", 42, 0.0).to_value().unwrap(),
            json!({ "term": { "count": 42 } })
        );
        assert_eq!(
            Query::term("published", true, 0.0).to_value().unwrap(),
            json!({ "term": { "published": true } })
        );
        assert_eq!(
            Query::term("meta", json!({ "value": "x" }), 0.0).to_value().unwrap(),
            json!({ "term": { "meta": { "value": "x" } } })
        );
    }

    #[test]
    fn test_term_non_finite_value_fails_to_serialize() {
        let query = Query::term("score", f64::NAN, 0.0);
        let err = query.to_json().unwrap_err();
        assert!(matches!(err, crate::DslError::Serialization(_)));
        assert!(err.to_string().contains("parameter 'score' is not a finite number"));
    }
}
