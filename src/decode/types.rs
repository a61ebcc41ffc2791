//! Decoded page types

use super::decoders::JsonPageDecoder;
use crate::error::Result;
use crate::types::Record;

/// One decoded page of a database query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
    /// Object elements of `results`, in server order
    pub records: Vec<Record>,
    /// `has_more`, false when absent or not a boolean
    pub has_more: bool,
    /// `next_cursor`, `None` when absent, null, not a string, or empty
    pub next_cursor: Option<String>,
    /// Number of non-object elements dropped from `results`
    pub skipped: usize,
}

impl QueryPage {
    /// Decode a Notion list response body
    pub fn from_body(body: &str) -> Result<Self> {
        JsonPageDecoder::new().decode(body)
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this page carried no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cursor to continue with, if the server reported more pages
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}
