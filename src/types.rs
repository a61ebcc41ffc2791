//! Common types used throughout notion-query
//!
//! This module contains shared type definitions, type aliases,
//! and API constants used across multiple modules.

use std::time::Duration;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One item returned by a database query.
///
/// Opaque to the fetch loop; the typed fields live under `"properties"`.
pub type Record = JsonObject;

// ============================================================================
// API Constants
// ============================================================================

/// Default Notion API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com";

/// API version sent in the `Notion-Version` header
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Header carrying the API version
pub const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// Page size hint sent with every query
pub const PAGE_SIZE: u32 = 100;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default file receiving the raw body of each page
pub const DEFAULT_DEBUG_OUTPUT: &str = "api_response.json";

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
