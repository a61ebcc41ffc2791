//! Pagination module
//!
//! Cursor pagination for POST-bodied list endpoints.
//!
//! # Overview
//!
//! The first request carries only the page-size hint. Every later request
//! adds the cursor returned by the previous page. Pagination ends at the
//! first page whose `has_more` flag is false or absent.

mod cursor;
mod types;

pub use cursor::QueryPaginator;
pub use types::{NextPage, PaginationState};
