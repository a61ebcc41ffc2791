//! Database query module
//!
//! Runs the full pagination loop against one database and collects every
//! record the server returns.
//!
//! # Overview
//!
//! [`DatabaseQuery::fetch_all`] posts page after page, in sequence, until
//! the server stops reporting more. Each raw body goes to the configured
//! [`DiagnosticsSink`](crate::diagnostics::DiagnosticsSink) before it is
//! decoded. A transport or decode failure stops the loop; the records
//! gathered up to that point travel with the error in [`PartialFetch`].

mod fetcher;

pub use fetcher::{DatabaseQuery, FetchSummary, PartialFetch};

#[cfg(test)]
mod tests;
