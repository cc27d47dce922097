//! Per-field-type value extraction from a live dialog's inputs.
//!
//! This is the half of a fields dialog that owns real contracts: when the
//! dialog closes affirmatively, the schema is walked once, in declaration
//! order, and every field's extractor reads the live input it declared.

use crate::error::DialogError;
use crate::fields::{FieldSchema, FieldType, FieldValue, ValueMap};

/// Read access to one live form input inside an open dialog.
pub trait FieldInput {
    /// Current textual content of the input.
    fn text(&self) -> String;

    /// Whether a toggle input is currently checked.
    fn checked(&self) -> bool;
}

/// The set of live inputs a dialog view exposes for extraction, keyed the
/// same way as its field schema.
pub trait FieldSource {
    fn input(&self, key: &str) -> Option<&dyn FieldInput>;
}

/// Extract one field's contribution from its live input.
///
/// Text-family fields pass their raw textual value through unchanged
/// (numeric parsing is the caller's concern), checkboxes report their
/// checked state, and `Action` fields never contribute. The match is
/// exhaustive over `FieldType`, so an unhandled type cannot reach runtime.
pub fn extract(field_type: FieldType, input: &dyn FieldInput) -> Option<FieldValue> {
    match field_type {
        FieldType::Text
        | FieldType::Password
        | FieldType::Textarea
        | FieldType::Number
        | FieldType::Select => Some(FieldValue::Text(input.text())),
        FieldType::Checkbox => Some(FieldValue::Flag(input.checked())),
        FieldType::Action => None,
    }
}

/// Walk the schema in order and collect every contributing field into a
/// [`ValueMap`].
///
/// A declared key with no matching live input is a configuration defect and
/// fails the whole extraction rather than silently dropping the field.
pub fn collect_values(
    schema: &FieldSchema,
    source: &dyn FieldSource,
) -> Result<ValueMap, DialogError> {
    let mut values = ValueMap::new();
    for (key, descriptor) in schema.iter() {
        let input = source
            .input(key)
            .ok_or_else(|| DialogError::Config(format!("no live input for field '{}'", key)))?;
        if let Some(value) = extract(descriptor.field_type, input) {
            values.insert(key.to_string(), value);
        }
    }
    Ok(values)
}
