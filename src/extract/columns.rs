//! Declarative row flattening
//!
//! A [`ColumnSpec`] names an output column, the property it reads, and the
//! [`FieldKind`] used to decode it. [`flatten_record`] applies a list of
//! specs to one record and produces a flat JSON object.

use super::fields;
use crate::types::{JsonObject, JsonValue, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static EMPTY_OBJECT: Lazy<JsonObject> = Lazy::new(JsonObject::new);

/// Property mapping of a record, or an empty mapping if absent or mistyped
pub fn properties(record: &Record) -> &JsonObject {
    record
        .get("properties")
        .and_then(JsonValue::as_object)
        .unwrap_or_else(|| &*EMPTY_OBJECT)
}

/// Extraction kinds supported by the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Title,
    Status,
    FloatNumber,
    IntegerNumber,
    PlainText,
    CleanPlainText,
    Select,
    MultiSelect,
    Date,
    Url,
    CleanUrl,
    Email,
    PhoneNumber,
    FormulaText,
    FormulaNumber,
    RollupPlainText,
    RollupFormulaString,
}

impl FieldKind {
    /// All kinds, in declaration order
    pub const ALL: [FieldKind; 17] = [
        FieldKind::Title,
        FieldKind::Status,
        FieldKind::FloatNumber,
        FieldKind::IntegerNumber,
        FieldKind::PlainText,
        FieldKind::CleanPlainText,
        FieldKind::Select,
        FieldKind::MultiSelect,
        FieldKind::Date,
        FieldKind::Url,
        FieldKind::CleanUrl,
        FieldKind::Email,
        FieldKind::PhoneNumber,
        FieldKind::FormulaText,
        FieldKind::FormulaNumber,
        FieldKind::RollupPlainText,
        FieldKind::RollupFormulaString,
    ];

    /// Decode property `key` of `props` as this kind
    pub fn extract(self, props: &JsonObject, key: &str) -> FieldValue {
        match self {
            FieldKind::Title => FieldValue::Text(fields::title(props, key)),
            FieldKind::Status => FieldValue::Text(fields::status(props, key)),
            FieldKind::FloatNumber => FieldValue::Text(fields::float_number(props, key)),
            FieldKind::IntegerNumber => FieldValue::Text(fields::integer_number(props, key)),
            FieldKind::PlainText => FieldValue::Text(fields::plain_text(props, key)),
            FieldKind::CleanPlainText => FieldValue::Text(fields::clean_plain_text(props, key)),
            FieldKind::Select => FieldValue::Text(fields::select(props, key)),
            FieldKind::MultiSelect => FieldValue::List(fields::multi_select(props, key)),
            FieldKind::Date => FieldValue::Text(fields::date(props, key)),
            FieldKind::Url => FieldValue::Text(fields::url(props, key)),
            FieldKind::CleanUrl => FieldValue::Text(fields::clean_url(props, key)),
            FieldKind::Email => FieldValue::Text(fields::email(props, key)),
            FieldKind::PhoneNumber => FieldValue::Text(fields::phone_number(props, key)),
            FieldKind::FormulaText => FieldValue::Text(fields::formula_text(props, key)),
            FieldKind::FormulaNumber => FieldValue::Number(fields::formula_number(props, key)),
            FieldKind::RollupPlainText => FieldValue::List(fields::rollup_plain_text(props, key)),
            FieldKind::RollupFormulaString => {
                FieldValue::Text(fields::rollup_formula_string(props, key))
            }
        }
    }
}

/// A decoded property value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl FieldValue {
    /// Borrow the text, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Text(s) => JsonValue::String(s.clone()),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(JsonValue::Null, JsonValue::Number),
            FieldValue::List(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
        }
    }
}

/// One output column of a flattened row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Output key
    pub column: String,
    /// Property name in the record
    pub property: String,
    /// How to decode the property
    pub kind: FieldKind,
}

impl ColumnSpec {
    /// Create a column spec
    pub fn new(column: impl Into<String>, property: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            column: column.into(),
            property: property.into(),
            kind,
        }
    }
}

/// Flatten one record into a JSON object keyed by column name
pub fn flatten_record(record: &Record, columns: &[ColumnSpec]) -> JsonObject {
    let props = properties(record);
    columns
        .iter()
        .map(|spec| {
            let value = spec.kind.extract(props, &spec.property);
            (spec.column.clone(), value.to_json())
        })
        .collect()
}
