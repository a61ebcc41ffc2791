//! Start-cursor pagination over a JSON request body

use super::types::{NextPage, PaginationState};
use crate::decode::QueryPage;
use crate::types::PAGE_SIZE;
use serde_json::{json, Value};
use tracing::warn;

/// Cursor paginator for database queries
///
/// Builds the request body for each page and decides, from a decoded
/// page, whether another request follows.
/// Body layout: `{"page_size": 100, "start_cursor": "..."}`.
#[derive(Debug, Clone)]
pub struct QueryPaginator {
    /// Page size hint sent with every request
    pub page_size: u32,
    /// Body field carrying the cursor
    pub cursor_param: String,
}

impl Default for QueryPaginator {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            cursor_param: "start_cursor".to_string(),
        }
    }
}

impl QueryPaginator {
    /// Create a paginator with the default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Request body for the next page
    pub fn request_body(&self, state: &PaginationState) -> Value {
        let mut body = json!({ "page_size": self.page_size });
        if let Some(cursor) = &state.cursor {
            body[self.cursor_param.as_str()] = Value::String(cursor.clone());
        }
        body
    }

    /// Process a decoded page and determine if there's a next page
    pub fn process_page(&self, page: &QueryPage, state: &mut PaginationState) -> NextPage {
        state.next_page();
        state.add_fetched(page.len() as u64);

        if !page.has_more {
            state.mark_done();
            return NextPage::Done;
        }

        match &page.next_cursor {
            Some(cursor) => {
                state.set_cursor(cursor.clone());
                NextPage::with_cursor(cursor.clone())
            }
            None => {
                warn!(
                    page = state.pages,
                    "Server reported more pages without a cursor, stopping"
                );
                state.mark_done();
                NextPage::Done
            }
        }
    }
}
