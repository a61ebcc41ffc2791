//! Configuration for a Notion database query
//!
//! This module loads the JSON config file holding the integration token and
//! database id, applies defaults for the optional fields, and derives the
//! query endpoint. The resulting [`NotionConfig`] is read-only for the
//! lifetime of the process.

use crate::error::{Error, Result};
use crate::extract::ColumnSpec;
use crate::types::{
    DEFAULT_API_BASE_URL, DEFAULT_DEBUG_OUTPUT, DEFAULT_NOTION_VERSION, DEFAULT_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

// ============================================================================
// Notion Config
// ============================================================================

/// Complete query configuration loaded from JSON
#[derive(Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token sent as a bearer credential
    #[serde(default)]
    pub notion_token: String,

    /// Id of the database to query
    #[serde(default)]
    pub notion_database_id: String,

    /// API host (overridable for testing against a mock server)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// File receiving the pretty-printed body of each page
    #[serde(default = "default_debug_output")]
    pub debug_output: PathBuf,

    /// Columns produced when flattening records
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_notion_version() -> String {
    DEFAULT_NOTION_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_debug_output() -> PathBuf {
    PathBuf::from(DEFAULT_DEBUG_OUTPUT)
}

impl NotionConfig {
    /// Create a config with the two required values and defaults elsewhere
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            notion_token: token.into(),
            notion_database_id: database_id.into(),
            api_base_url: default_api_base_url(),
            notion_version: default_notion_version(),
            timeout_secs: default_timeout_secs(),
            debug_output: default_debug_output(),
            columns: Vec::new(),
        }
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;

        debug!(
            database_id = %config.notion_database_id,
            api_base_url = %config.api_base_url,
            columns = config.columns.len(),
            "Config loaded"
        );
        Ok(config)
    }

    /// Set the API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the per-request timeout, rounded up to whole seconds
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }

    /// Set the flattening columns
    #[must_use]
    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    /// Check required fields and derived values
    pub fn validate(&self) -> Result<()> {
        if self.notion_token.trim().is_empty() {
            return Err(Error::missing_field("notion_token"));
        }
        if self.notion_database_id.trim().is_empty() {
            return Err(Error::missing_field("notion_database_id"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be at least 1"));
        }
        if self.notion_version.trim().is_empty() {
            return Err(Error::invalid_value("notion_version", "must not be empty"));
        }
        self.query_url()?;
        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Query endpoint: `<base>/v1/databases/<id>/query`
    pub fn query_url(&self) -> Result<Url> {
        let base = Url::parse(&self.api_base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "api_base_url",
                format!("'{}' cannot be used as a base URL", self.api_base_url),
            ));
        }

        let mut url = base;
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("api_base_url", "cannot be a base"))?
            .pop_if_empty()
            .extend(["v1", "databases", self.notion_database_id.trim(), "query"]);
        Ok(url)
    }
}

impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("notion_token", &"***")
            .field("notion_database_id", &self.notion_database_id)
            .field("api_base_url", &self.api_base_url)
            .field("notion_version", &self.notion_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("debug_output", &self.debug_output)
            .field("columns", &self.columns)
            .finish()
    }
}
