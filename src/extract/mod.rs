//! Property extraction module
//!
//! Total accessors that decode Notion property objects into plain values.
//!
//! # Overview
//!
//! A record's `properties` object maps each property name to a nested
//! structure whose shape depends on the property's type. The functions in
//! this module walk those structures one checked step at a time and fall
//! back to a per-kind default on any mismatch, so one malformed property
//! never stops the rest of a record from being read.
//!
//! ```rust
//! use notion_query::extract;
//! use serde_json::json;
//!
//! let record = json!({
//!     "properties": {
//!         "Name": {"title": [{"text": {"content": "Widget"}}]},
//!         "Price": {"number": 12.5}
//!     }
//! });
//! let props = extract::properties(record.as_object().unwrap());
//!
//! assert_eq!(extract::title(props, "Name"), "Widget");
//! assert_eq!(extract::float_number(props, "Price"), "12.50");
//! assert_eq!(extract::status(props, "Stage"), "No Status");
//! ```

mod columns;
mod fields;
pub mod path;

pub use columns::{flatten_record, properties, ColumnSpec, FieldKind, FieldValue};
pub use fields::{
    clean_plain_text, clean_url, date, email, float_number, formula_number, formula_text,
    integer_number, multi_select, phone_number, plain_text, rollup_formula_string,
    rollup_plain_text, select, status, title, url, FORMULA_TEXT_SUFFIX, NO_NAME, NO_STATUS,
};
