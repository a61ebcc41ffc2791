//! Diagnostics sink module
//!
//! Receives the raw body of every fetched page. Sinks are observers: they
//! cannot fail the fetch, and the records returned to the caller never
//! depend on them.
//!
//! # Sinks
//!
//! - [`FileSink`]: pretty-prints each body into one fixed file
//! - [`MemorySink`]: keeps bodies in memory
//! - [`NullSink`]: discards everything

mod sinks;

pub use sinks::{pretty_json, FileSink, MemorySink, NullSink};

use async_trait::async_trait;

/// Receiver of raw page bodies
#[async_trait]
pub trait DiagnosticsSink: Send + Sync {
    /// Called once before the first request of a fetch
    async fn begin(&self) {}

    /// Called with the raw body of each page, `page` counting from 0
    async fn record_page(&self, page: u32, body: &str);
}

#[cfg(test)]
mod tests;
