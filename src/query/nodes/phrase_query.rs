//! Phrase query - match terms in order

use super::leaf::{LeafKind, LeafQuery};
use crate::query::ast::Query;
use serde_json::Value;

impl Query {
    /// Analyze `text` and match it as a phrase in `field`
    pub fn match_phrase(field: impl Into<String>, text: impl Into<String>) -> Query {
        Query::Leaf(LeafQuery::with_field(
            LeafKind::MatchPhrase,
            field,
            Value::String(text.into()),
        ))
    }
}
