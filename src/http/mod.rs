//! HTTP client module
//!
//! Provides a single-attempt JSON POST client.
//!
//! # Features
//!
//! - **Bearer Authentication**: Static token applied to every request
//! - **Default Headers**: API version and content type set once
//! - **Timeouts**: One timeout bounding each request
//! - **Error Classification**: Timeouts and transport failures map to
//!   distinct error variants; a non-success status keeps its body until
//!   [`RawResponse::into_body`] turns it into an error

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RawResponse};
