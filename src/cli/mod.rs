//! CLI module
//!
//! Command-line interface for querying a database.
//!
//! # Commands
//!
//! - `check` - Validate config and fetch the first page
//! - `fetch` - Fetch every record, raw or flattened

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
