// src/form/value.rs
use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::FilePart;
use crate::error::{AppError, AppResult};

pub type FormValues = BTreeMap<String, FieldValue>;

/// A file chosen in the webview, base64-encoded for transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime: Option<String>,
    pub data: String,
}

impl FileAttachment {
    pub fn into_part(self, field: &str) -> AppResult<FilePart> {
        let bytes = STANDARD.decode(self.data.as_bytes()).map_err(|e| AppError::InvalidField {
            field: field.to_string(),
            message: format!("file is not valid base64: {}", e),
        })?;

        Ok(FilePart {
            field: field.to_string(),
            file_name: self.file_name,
            mime: self.mime,
            bytes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Empty,
    Text(String),
    Bool(bool),
    File(FileAttachment),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Empty values and blank text
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    Text,
    Number,
    Email,
    Password,
    Date,
    #[serde(rename = "datetime-local")]
    DateTimeLocal,
    Time,
    Select,
    Textarea,
    Checkbox,
    File,
}

/// A form control change coming from the webview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub file: Option<FileAttachment>,
}

impl ChangeEvent {
    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            input_type: InputType::Text,
            value: value.to_string(),
            checked: false,
            file: None,
        }
    }

    pub fn checkbox(name: &str, checked: bool) -> Self {
        Self {
            name: name.to_string(),
            input_type: InputType::Checkbox,
            value: "on".to_string(),
            checked,
            file: None,
        }
    }
}

/// Prefill values from a record, e.g. when the edit modal opens.
///
/// Numbers become their text form so they round-trip through inputs;
/// nested values keep their JSON text.
pub fn values_from_record<T: Serialize>(record: &T) -> AppResult<FormValues> {
    let Value::Object(object) = serde_json::to_value(record)? else {
        return Err(AppError::Other("Record is not a JSON object".to_string()));
    };

    let values = object
        .into_iter()
        .map(|(key, value)| {
            let field = match value {
                Value::Null => FieldValue::Empty,
                Value::Bool(b) => FieldValue::Bool(b),
                Value::String(s) => FieldValue::Text(s),
                Value::Number(n) => FieldValue::Text(n.to_string()),
                other => FieldValue::Text(other.to_string()),
            };
            (key, field)
        })
        .collect();

    Ok(values)
}
