//! Form field data model: field types, schemas, and extracted value maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of input types a fields dialog can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Password,
    Textarea,
    Number,
    Select,
    Checkbox,
    /// Triggers a side effect instead of holding state; never contributes
    /// a value to the extraction result.
    Action,
}

/// Declaration of a single form field. Immutable once a dialog is opened.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Enumerated options for `Select` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl FieldDescriptor {
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            field_type,
            choices: None,
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new(label, FieldType::Text)
    }

    pub fn password(label: impl Into<String>) -> Self {
        Self::new(label, FieldType::Password)
    }

    pub fn checkbox(label: impl Into<String>) -> Self {
        Self::new(label, FieldType::Checkbox)
    }

    pub fn select(label: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            label: label.into(),
            field_type: FieldType::Select,
            choices: Some(choices),
        }
    }
}

/// Ordered mapping from field key to descriptor.
///
/// Insertion order defines both the rendered form order and the extraction
/// order; keys are expected to be unique.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldSchema {
    entries: Vec<(String, FieldDescriptor)>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for declaring a schema inline.
    pub fn with(mut self, key: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    /// Append a field; a duplicate key replaces the earlier descriptor
    /// while keeping its position.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: FieldDescriptor) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = descriptor;
        } else {
            self.entries.push((key, descriptor));
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| d)
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A value extracted from a live form input.
///
/// Variant order matters for the untagged serde representation: booleans
/// must be tried before strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Key/value result of a fields dialog. An absent key means the field made
/// no contribution (e.g. `Action` fields).
pub type ValueMap = BTreeMap<String, FieldValue>;
