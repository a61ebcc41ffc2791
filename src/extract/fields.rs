//! Per-kind property extractors
//!
//! Every function takes the property mapping of one record plus a property
//! name and returns a plain value. None of them can fail: any missing key
//! or mistyped step along the path yields the documented default.

use super::path::{first_object, get_array, get_f64, get_object, get_str};
use crate::types::JsonObject;
use chrono::NaiveDate;

/// Default for a missing title
pub const NO_NAME: &str = "No Name";

/// Default for a missing status
pub const NO_STATUS: &str = "No Status";

/// Suffix of the text companion property read by [`formula_text`]
pub const FORMULA_TEXT_SUFFIX: &str = " (As Text)";

const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";
const OUTPUT_DATE_FORMAT: &str = "%m/%d/%Y";

/// The typed property object for `key`
fn property<'a>(props: &'a JsonObject, key: &str) -> Option<&'a JsonObject> {
    get_object(props, key)
}

/// `.rich_text[0].plain_text`
fn first_plain_text<'a>(field: &'a JsonObject) -> Option<&'a str> {
    get_str(first_object(field, "rich_text")?, "plain_text")
}

fn string_field(props: &JsonObject, key: &str, field: &str) -> Option<String> {
    get_str(property(props, key)?, field).map(str::to_string)
}

fn trimmed_field(props: &JsonObject, key: &str, field: &str) -> String {
    property(props, key)
        .and_then(|p| get_str(p, field))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn number(props: &JsonObject, key: &str) -> Option<f64> {
    get_f64(property(props, key)?, "number")
}

// ============================================================================
// Scalar Text
// ============================================================================

/// Page title: `.title[0].text.content`, or `"No Name"`
pub fn title(props: &JsonObject, key: &str) -> String {
    property(props, key)
        .and_then(|p| first_object(p, "title"))
        .and_then(|t| get_object(t, "text"))
        .and_then(|t| get_str(t, "content"))
        .unwrap_or(NO_NAME)
        .to_string()
}

/// Status name: `.status.name`, or `"No Status"`
pub fn status(props: &JsonObject, key: &str) -> String {
    property(props, key)
        .and_then(|p| get_object(p, "status"))
        .and_then(|s| get_str(s, "name"))
        .unwrap_or(NO_STATUS)
        .to_string()
}

/// First rich text run: `.rich_text[0].plain_text`
pub fn plain_text(props: &JsonObject, key: &str) -> String {
    property(props, key)
        .and_then(first_plain_text)
        .unwrap_or_default()
        .to_string()
}

/// [`plain_text`] with surrounding whitespace and newlines removed
pub fn clean_plain_text(props: &JsonObject, key: &str) -> String {
    property(props, key)
        .and_then(first_plain_text)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Selected option: `.select.name`. A cleared select is `null` on the wire.
pub fn select(props: &JsonObject, key: &str) -> String {
    property(props, key)
        .and_then(|p| get_object(p, "select"))
        .and_then(|s| get_str(s, "name"))
        .unwrap_or_default()
        .to_string()
}

/// All selected option names, in order: `.multi_select[*].name`
pub fn multi_select(props: &JsonObject, key: &str) -> Vec<String> {
    property(props, key)
        .and_then(|p| get_array(p, "multi_select"))
        .map(|items| {
            items
                .iter()
                .filter_map(|item| get_str(item.as_object()?, "name"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Start date reformatted from `YYYY-MM-DD` to `MM/DD/YYYY`.
///
/// A start value that does not parse (a datetime, say) comes back
/// unchanged. A missing or empty start yields `""`.
pub fn date(props: &JsonObject, key: &str) -> String {
    let Some(start) = property(props, key)
        .and_then(|p| get_object(p, "date"))
        .and_then(|d| get_str(d, "start"))
        .filter(|s| !s.is_empty())
    else {
        return String::new();
    };

    match NaiveDate::parse_from_str(start, SOURCE_DATE_FORMAT) {
        Ok(parsed) => parsed.format(OUTPUT_DATE_FORMAT).to_string(),
        Err(_) => start.to_string(),
    }
}

/// `.url` as stored
pub fn url(props: &JsonObject, key: &str) -> String {
    string_field(props, key, "url").unwrap_or_default()
}

/// `.url`, trimmed
pub fn clean_url(props: &JsonObject, key: &str) -> String {
    trimmed_field(props, key, "url")
}

/// `.email`, trimmed
pub fn email(props: &JsonObject, key: &str) -> String {
    trimmed_field(props, key, "email")
}

/// `.phone_number`, trimmed
pub fn phone_number(props: &JsonObject, key: &str) -> String {
    trimmed_field(props, key, "phone_number")
}

// ============================================================================
// Numbers
// ============================================================================

/// `.number` with exactly two decimals, or `""`
pub fn float_number(props: &JsonObject, key: &str) -> String {
    number(props, key)
        .map(|n| format!("{n:.2}"))
        .unwrap_or_default()
}

/// `.number` truncated toward zero, or `""`
pub fn integer_number(props: &JsonObject, key: &str) -> String {
    number(props, key)
        .map(|n| (n.trunc() as i64).to_string())
        .unwrap_or_default()
}

// ============================================================================
// Formulas
// ============================================================================

/// `.formula.string` of the companion property `"<key> (As Text)"`
pub fn formula_text(props: &JsonObject, key: &str) -> String {
    let lookup = format!("{key}{FORMULA_TEXT_SUFFIX}");
    property(props, &lookup)
        .and_then(|p| get_object(p, "formula"))
        .and_then(|f| get_str(f, "string"))
        .unwrap_or_default()
        .to_string()
}

/// `.formula.number`, or `0.0`
pub fn formula_number(props: &JsonObject, key: &str) -> f64 {
    property(props, key)
        .and_then(|p| get_object(p, "formula"))
        .and_then(|f| get_f64(f, "number"))
        .unwrap_or(0.0)
}

// ============================================================================
// Rollups
// ============================================================================

fn rollup_items<'a>(props: &'a JsonObject, key: &str) -> Option<&'a Vec<serde_json::Value>> {
    property(props, key)
        .and_then(|p| get_object(p, "rollup"))
        .and_then(|r| get_array(r, "array"))
}

/// `.rollup.array[*].rich_text[0].plain_text`, one entry per item that has it.
///
/// Returns `[""]` rather than an empty list when nothing was collected,
/// whether the rollup is absent, malformed, or present with no items.
pub fn rollup_plain_text(props: &JsonObject, key: &str) -> Vec<String> {
    let values: Vec<String> = rollup_items(props, key)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| first_plain_text(item.as_object()?))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if values.is_empty() {
        vec![String::new()]
    } else {
        values
    }
}

/// First `.rollup.array[*].formula.string`; scanning stops at the first hit
pub fn rollup_formula_string(props: &JsonObject, key: &str) -> String {
    rollup_items(props, key)
        .and_then(|items| {
            items.iter().find_map(|item| {
                let formula = get_object(item.as_object()?, "formula")?;
                get_str(formula, "string")
            })
        })
        .unwrap_or_default()
        .to_string()
}
