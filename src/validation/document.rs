//! Structural checks on the parsed configuration document.
//!
//! The document is kept as an untyped [`serde_yaml::Value`]: a field counts
//! as present only when its value is truthy, so `name: ""` and a missing
//! `name` are indistinguishable.

use serde_yaml::Value;

use crate::error::FieldHint;

/// Top-level fields every configuration must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "version", "schema"];

/// Fields every `models` entry must carry, in reporting order.
pub const MODEL_FIELDS: [&str; 3] = ["name", "provider", "model"];

/// Key holding the model declarations.
pub const MODELS_KEY: &str = "models";

/// Maximum edit distance for a key to be reported as a likely misspelling.
const HINT_MAX_DISTANCE: usize = 2;

/// Returns whether a YAML value counts as "present".
///
/// `null`, `false`, numeric zero, `NaN` and the empty string are falsy.
/// Every other value is truthy, including empty sequences and mappings.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Returns the subset of `fields` that is absent or falsy in `value`.
///
/// A non-mapping `value` has no fields, so every field is reported.
fn missing_of(value: &Value, fields: &[&'static str]) -> Vec<&'static str> {
    fields
        .iter()
        .copied()
        .filter(|field| !value.get(*field).is_some_and(is_truthy))
        .collect()
}

/// Returns the required top-level fields missing from `doc`, in fixed order.
#[must_use]
pub fn missing_required_fields(doc: &Value) -> Vec<&'static str> {
    missing_of(doc, &REQUIRED_FIELDS)
}

/// Suggests top-level keys that look like misspellings of `missing` fields.
///
/// Keys that are themselves known fields are never suggested.
#[must_use]
pub fn field_hints(doc: &Value, missing: &[&'static str]) -> Vec<FieldHint> {
    let Some(mapping) = doc.as_mapping() else {
        return Vec::new();
    };

    let unknown_keys: Vec<&str> = mapping
        .iter()
        .filter_map(|(key, _)| key.as_str())
        .filter(|key| !REQUIRED_FIELDS.iter().any(|field| field == key) && *key != MODELS_KEY)
        .collect();

    missing
        .iter()
        .filter_map(|&field| {
            unknown_keys
                .iter()
                .map(|key| (*key, strsim::damerau_levenshtein(field, key)))
                .filter(|(_, dist)| *dist <= HINT_MAX_DISTANCE)
                .min_by_key(|(_, dist)| *dist)
                .map(|(key, _)| FieldHint {
                    field,
                    candidate: key.to_string(),
                })
        })
        .collect()
}

/// Returns the `models` sequence, or `None` when it is absent or not a
/// sequence.
#[must_use]
pub fn model_entries(doc: &Value) -> Option<&[Value]> {
    doc.get(MODELS_KEY)
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
}

/// Finds the first model entry lacking a required field.
///
/// Returns the 1-based index and the missing fields of that entry.
#[must_use]
pub fn first_invalid_model(entries: &[Value]) -> Option<(usize, Vec<&'static str>)> {
    entries.iter().enumerate().find_map(|(i, entry)| {
        let missing = missing_of(entry, &MODEL_FIELDS);
        (!missing.is_empty()).then_some((i + 1, missing))
    })
}
