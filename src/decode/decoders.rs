//! Decoder implementations

use super::types::QueryPage;
use crate::error::{Error, Result};
use crate::extract::path::{get_bool, get_str};
use crate::types::JsonValue;
use tracing::debug;

/// JSON decoder for paginated list responses
#[derive(Debug, Clone)]
pub struct JsonPageDecoder {
    /// Key of the records array
    results_key: String,
    /// Key of the has-more flag
    has_more_key: String,
    /// Key of the next-page cursor
    cursor_key: String,
}

impl Default for JsonPageDecoder {
    fn default() -> Self {
        Self {
            results_key: "results".to_string(),
            has_more_key: "has_more".to_string(),
            cursor_key: "next_cursor".to_string(),
        }
    }
}

impl JsonPageDecoder {
    /// Create a decoder for the Notion list response layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder for a list response using different key names
    pub fn with_keys(
        results_key: impl Into<String>,
        has_more_key: impl Into<String>,
        cursor_key: impl Into<String>,
    ) -> Self {
        Self {
            results_key: results_key.into(),
            has_more_key: has_more_key.into(),
            cursor_key: cursor_key.into(),
        }
    }

    /// Parse the body into a JSON value
    pub fn decode_raw(&self, body: &str) -> Result<JsonValue> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }

    /// Parse the body and extract records and continuation
    pub fn decode(&self, body: &str) -> Result<QueryPage> {
        let value = self.decode_raw(body)?;
        self.decode_value(value)
    }

    /// Extract records and continuation from an already parsed body
    pub fn decode_value(&self, value: JsonValue) -> Result<QueryPage> {
        let JsonValue::Object(mut body) = value else {
            return Err(Error::decode("response body is not a JSON object"));
        };

        let has_more = get_bool(&body, &self.has_more_key).unwrap_or(false);
        let next_cursor = get_str(&body, &self.cursor_key)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let mut page = QueryPage {
            records: Vec::new(),
            has_more,
            next_cursor,
            skipped: 0,
        };

        match body.remove(&self.results_key) {
            Some(JsonValue::Array(results)) => {
                page.records.reserve(results.len());
                for item in results {
                    match item {
                        JsonValue::Object(record) => page.records.push(record),
                        _ => page.skipped += 1,
                    }
                }
            }
            _ => debug!(key = %self.results_key, "Response has no results array"),
        }

        if page.skipped > 0 {
            debug!(skipped = page.skipped, "Dropped non-object results");
        }
        Ok(page)
    }
}
