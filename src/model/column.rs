// src/model/column.rs
use serde::{Deserialize, Serialize};

/// The type a field's cells are coerced to before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Date,
    #[serde(alias = "boolean")]
    Bool,
    #[default]
    String,
}

impl FieldType {
    /// Human-readable name, used in validation messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Bool => "bool",
            FieldType::String => "string",
        }
    }
}

/// A dataset column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,

    /// Declared type, as authored in the composer.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<FieldType>,

    /// Type detected at import time; consulted when nothing is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_type: Option<FieldType>,
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            declared_type: None,
            inferred_type: None,
        }
    }

    pub fn typed(id: impl Into<String>, ty: FieldType) -> Self {
        Column {
            id: id.into(),
            declared_type: Some(ty),
            inferred_type: None,
        }
    }

    /// Effective type: declared wins over inferred, default is string.
    pub fn field_type(&self) -> FieldType {
        self.declared_type
            .or(self.inferred_type)
            .unwrap_or_default()
    }
}
