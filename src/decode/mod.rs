//! Response decoder module
//!
//! Turns the raw body of one query response into a [`QueryPage`].
//!
//! # Overview
//!
//! A body that is not JSON is a hard failure. Inside valid JSON the decoder
//! is forgiving: a missing `results` array is an empty page, non-object
//! elements are skipped, and a missing or mistyped `has_more` means the
//! listing is finished.

mod decoders;
mod types;

pub use decoders::JsonPageDecoder;
pub use types::QueryPage;
