// src/api/body.rs
//
// Request bodies: JSON for plain resources, multipart for file-bearing ones.

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartPayload),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartPayload {
    /// Text fields from a JSON object. Nulls are left out so the backend
    /// keeps its own default; strings go as-is, other values as JSON text.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key.clone(), s.clone())),
                other => Some((key.clone(), other.to_string())),
            })
            .collect();

        Self {
            fields,
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: FilePart) -> Self {
        self.files.push(file);
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn into_form(self) -> AppResult<Form> {
        let mut form = Form::new();

        for (key, value) in self.fields {
            form = form.text(key, value);
        }

        for file in self.files {
            let mut part = Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = &file.mime {
                part = part.mime_str(mime)?;
            }
            form = form.part(file.field, part);
        }

        Ok(form)
    }
}
