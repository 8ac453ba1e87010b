use serde::Serialize;
use serde_json::Value;

use super::sort::Sort;
use crate::config::{non_blank, RequestConfig};
use crate::error::Result;
use crate::query::Query;

/// Search request body
///
/// Serialized as `{ "query": .., "sort": [..], "from": .., "size": .., "timeout": .. }`.
/// Every field is optional and left out when unset; presence is explicit, so
/// `set_page_size(0)` writes `"size":0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<Query>,
    #[serde(rename = "sort", skip_serializing_if = "Vec::is_empty")]
    sortings: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<String>,
}

impl SearchRequest {
    /// Create a request around `query`
    pub fn new(query: Query) -> Self {
        Self {
            query: Some(query),
            ..Default::default()
        }
    }

    /// Create a request around `query` with the configured page size and timeout
    pub fn with_config(query: Query, config: &RequestConfig) -> Self {
        let mut request = Self::new(query);
        request.size = config.page_size;
        request.timeout = config.timeout.clone().and_then(non_blank);
        request
    }

    /// Retrieve hits starting at this offset
    pub fn set_from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// Number of hits to return
    ///
    /// A size of 0 is written out and asks only for counts/aggregations.
    pub fn set_page_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Search timeout, e.g. "10s"; an empty or blank string removes it
    pub fn set_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = non_blank(timeout.into());
        self
    }

    /// Append sort entries, in order
    ///
    /// Accepts both `Sort` and the `Option<Sort>` returned by [`Sort::by_field`];
    /// `None` entries are skipped.
    pub fn sort<I, S>(mut self, sortings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<Sort>>,
    {
        self.sortings
            .extend(sortings.into_iter().filter_map(Into::<Option<Sort>>::into));
        self
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn sortings(&self) -> &[Sort] {
        &self.sortings
    }

    pub fn from(&self) -> Option<u64> {
        self.from
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn timeout(&self) -> Option<&str> {
        self.timeout.as_deref()
    }

    /// Serialize into a JSON value
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize into the compact request body
    pub fn to_json(&self) -> Result<String> {
        let body = serde_json::to_string(self)?;
        tracing::debug!(
            bytes = body.len(),
            sortings = self.sortings.len(),
            "serialized search request"
        );
        Ok(body)
    }

    /// Serialize into an indented request body, for logs and debugging
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
