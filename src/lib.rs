// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # notion-query
//!
//! Fetch every record of a Notion database and decode its properties into
//! plain values.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Follows `next_cursor` until `has_more` is false
//! - **Partial Results**: A failed fetch still hands back what it received
//! - **Total Extractors**: Property accessors that return defaults instead
//!   of failing on missing or mistyped data
//! - **Row Flattening**: Declarative column specs over the extractors
//! - **Diagnostics**: Raw page bodies go to a pluggable sink
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use notion_query::{extract, DatabaseQuery, NotionConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> notion_query::Result<()> {
//!     let config = NotionConfig::from_file("config.json")?;
//!     let query = DatabaseQuery::new(&config)?;
//!
//!     let records = query.fetch_all().await?;
//!     for record in &records {
//!         let props = extract::properties(record);
//!         println!("{} ({})", extract::title(props, "Name"), extract::date(props, "Due"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            DatabaseQuery::fetch_all → Vec<Record>        │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────┬────────────────┼───────────────┬─────────────┐
//! │   HTTP    │   Paginate     │    Decode     │ Diagnostics │
//! ├───────────┼────────────────┼───────────────┼─────────────┤
//! │ Bearer    │ page_size      │ results       │ File        │
//! │ Version   │ start_cursor   │ has_more      │ Memory      │
//! │ Timeout   │ has_more stop  │ next_cursor   │ Null        │
//! └───────────┴────────────────┴───────────────┴─────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │      extract::{title, status, date, rollup_*, ...}       │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and API constants
pub mod types;

/// Query configuration
pub mod config;

/// HTTP client with bearer auth
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Response page decoding
pub mod decode;

/// Raw page body sinks
pub mod diagnostics;

/// Paginated database query
pub mod query;

/// Total property extractors
pub mod extract;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::NotionConfig;
pub use error::{Error, ErrorCategory, Result};
pub use query::{DatabaseQuery, PartialFetch};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
