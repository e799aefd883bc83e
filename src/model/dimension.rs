// src/model/dimension.rs
use serde::{Deserialize, Serialize};

use super::FieldType;

/// A semantic-layer dimension: a stable id aliasing a raw dataset field.
///
/// Query specs and filters reference the dimension id; at query time the
/// alias resolves to `source_field`, falling back to the id itself when
/// no source field was authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<FieldType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,
}

impl Dimension {
    pub fn new(id: impl Into<String>, source_field: impl Into<String>) -> Self {
        Dimension {
            id: id.into(),
            label: None,
            data_type: None,
            source_field: Some(source_field.into()),
        }
    }

    /// The row key this dimension reads from.
    pub fn source_key(&self) -> &str {
        self.source_field.as_deref().unwrap_or(&self.id)
    }
}
