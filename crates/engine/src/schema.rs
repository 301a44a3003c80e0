//! Field schema derivation.
//!
//! Pages have no declared schema; the display fields are inferred from the
//! top-level keys of whatever the source returned. Only top-level keys are
//! modelled. Nested values are rendered as JSON text at display time.

use jitpages_types::{FieldProperty, PageData};
use serde_json::{Map, Value};

/// Derive display fields from a committed payload, all visible.
///
/// - empty, `false`, `0` and `""` payloads yield no fields
/// - arrays yield the keys of element 0 only (no fields for an empty array
///   or a non-object first element)
/// - objects yield their own keys in source order
/// - other scalars yield no fields
pub fn derive_fields(data: &PageData) -> Vec<FieldProperty> {
    match data {
        PageData::Empty | PageData::Scalar(_) => Vec::new(),
        PageData::Array(items) => match items.first() {
            Some(Value::Object(first)) => fields_from_keys(first),
            _ => Vec::new(),
        },
        PageData::Object(map) => fields_from_keys(map),
    }
}

fn fields_from_keys(map: &Map<String, Value>) -> Vec<FieldProperty> {
    map.keys().map(FieldProperty::visible).collect()
}
