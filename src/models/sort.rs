use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::query::Query;

/// Direction of a sort
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Which value to sort by when a field holds several values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Min,
    Max,
    Sum,
    Avg,
    Median,
}

/// Sort instruction for a single field
///
/// Serialized as `{ "<field>": { "order": .., "mode": .., "nested_path": .., "nested_filter": .. } }`
/// with unset options left out. `nested_filter` is only written together with
/// `nested_path`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sort {
    pub field: String,
    pub order: Option<SortOrder>,
    pub mode: Option<SortMode>,
    pub nested_path: Option<String>,
    pub nested_filter: Option<Query>,
}

#[derive(Serialize)]
struct SortOptions<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<SortMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nested_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nested_filter: Option<&'a Query>,
}

impl Sort {
    /// Sort by the value of `field`
    ///
    /// Returns `None` for an empty field name. [`crate::SearchRequest::sort`]
    /// drops such entries, so callers can pass the result through unchecked.
    pub fn by_field(field: impl Into<String>) -> Option<Sort> {
        let field = field.into();
        if field.is_empty() {
            return None;
        }

        Some(Sort {
            field,
            order: None,
            mode: None,
            nested_path: None,
            nested_filter: None,
        })
    }

    pub fn asc(mut self) -> Self {
        self.order = Some(SortOrder::Asc);
        self
    }

    pub fn desc(mut self) -> Self {
        self.order = Some(SortOrder::Desc);
        self
    }

    /// Pick the lowest value of a multi-valued field
    pub fn min(self) -> Self {
        self.with_mode(SortMode::Min)
    }

    /// Pick the highest value of a multi-valued field
    pub fn max(self) -> Self {
        self.with_mode(SortMode::Max)
    }

    /// Use the sum of all values of a multi-valued field
    pub fn sum(self) -> Self {
        self.with_mode(SortMode::Sum)
    }

    /// Use the average of all values of a multi-valued field
    pub fn avg(self) -> Self {
        self.with_mode(SortMode::Avg)
    }

    /// Use the median of all values of a multi-valued field
    pub fn median(self) -> Self {
        self.with_mode(SortMode::Median)
    }

    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sort by a field inside the nested objects under `path`
    ///
    /// An empty path clears the nested scope.
    pub fn nested(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.nested_path = if path.is_empty() { None } else { Some(path) };
        self
    }

    /// Only consider nested objects matching `query`; requires [`Sort::nested`]
    pub fn filter(mut self, query: Query) -> Self {
        self.nested_filter = Some(query);
        self
    }
}

impl Serialize for Sort {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nested_path = self.nested_path.as_deref();
        let options = SortOptions {
            order: self.order,
            mode: self.mode,
            nested_path,
            nested_filter: nested_path.and(self.nested_filter.as_ref()),
        };

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &options)?;
        map.end()
    }
}
