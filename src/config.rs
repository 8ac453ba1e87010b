use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DslError, Result};

/// Defaults applied to requests created through [`crate::SearchRequest::with_config`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Number of hits to return when the caller does not set one
    pub page_size: Option<u64>,
    /// Search timeout in the engine's time-unit notation (e.g. "10s", "500ms")
    pub timeout: Option<String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            page_size: Some(25),
            timeout: Some("10s".to_string()),
        }
    }
}

impl RequestConfig {
    /// Create a configuration that applies no defaults at all
    pub fn empty() -> Self {
        Self {
            page_size: None,
            timeout: None,
        }
    }

    /// Set the default page size
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the default timeout; a blank string disables it
    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = non_blank(timeout.into());
        self
    }

    /// Stop applying a default page size
    pub fn without_page_size(mut self) -> Self {
        self.page_size = None;
        self
    }

    /// Stop applying a default timeout
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Parse and validate a configuration from a JSON string
    ///
    /// Missing keys fall back to [`RequestConfig::default`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RequestConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded request config");
        Ok(config)
    }

    /// Reject values the engine would refuse
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = &self.timeout {
            if timeout.trim().is_empty() {
                return Err(DslError::InvalidConfig(
                    "timeout must not be empty; omit the key to disable it".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// `None` for an empty or whitespace-only timeout
pub(crate) fn non_blank(timeout: String) -> Option<String> {
    if timeout.trim().is_empty() {
        None
    } else {
        Some(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RequestConfig::default();
        assert_eq!(config.page_size, Some(25));
        assert_eq!(config.timeout.as_deref(), Some("10s"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RequestConfig::empty()
            .with_page_size(50)
            .with_timeout("1m")
            .without_timeout();

        assert_eq!(config.page_size, Some(50));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_blank_timeout_builder_disables() {
        assert_eq!(RequestConfig::default().with_timeout("  ").timeout, None);
        assert_eq!(RequestConfig::default().with_timeout("").timeout, None);
        assert_eq!(
            RequestConfig::empty().with_timeout("500ms").timeout.as_deref(),
            Some("500ms")
        );
    }

    #[test]
    fn test_from_json_str_fills_defaults() {
        let config = RequestConfig::from_json_str(r#"{ "page_size": 100 }"#).unwrap();
        assert_eq!(config.page_size, Some(100));
        assert_eq!(config.timeout.as_deref(), Some("10s"));
    }

    #[test]
    fn test_from_json_str_explicit_null_disables() {
        let config =
            RequestConfig::from_json_str(r#"{ "page_size": null, "timeout": null }"#).unwrap();
        assert_eq!(config, RequestConfig::empty());
    }

    #[test]
    fn test_empty_timeout_rejected() {
        let err = RequestConfig::from_json_str(r#"{ "timeout": "  " }"#).unwrap_err();
        assert!(matches!(err, DslError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = RequestConfig::from_json_str("page_size = 10").unwrap_err();
        assert!(matches!(err, DslError::Serialization(_)));
    }
}
