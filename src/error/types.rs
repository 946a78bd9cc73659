// src/error/types.rs
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::camera::CameraError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}")]
    Api { status: u16, body: Option<Value> },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Resource not found")]
    NotFound,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Human message supplied by the backend, `detail` first, then `message`.
    pub fn server_message(&self) -> Option<String> {
        let AppError::Api {
            body: Some(body), ..
        } = self
        else {
            return None;
        };

        ["detail", "message"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    }

    /// Server message when there is one, otherwise the caller's template.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Field-keyed validation errors carried by an API error body.
    ///
    /// DRF-style bodies map a field to a list of messages; lists are joined
    /// into one line per field. Non-object bodies yield `None`.
    pub fn field_errors(&self) -> Option<BTreeMap<String, String>> {
        if let AppError::InvalidField { field, message } = self {
            return Some(BTreeMap::from([(field.clone(), message.clone())]));
        }

        let AppError::Api {
            body: Some(Value::Object(map)),
            ..
        } = self
        else {
            return None;
        };

        let errors = map
            .iter()
            .map(|(field, value)| (field.clone(), flatten_message(value)))
            .collect();

        Some(errors)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}

fn flatten_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_message)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Validation(format!("Date parse error: {}", err))
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Camera(CameraError::Encoding(err.to_string()))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api(body: Value) -> AppError {
        AppError::Api {
            status: 400,
            body: Some(body),
        }
    }

    #[test]
    fn test_detail_is_preferred_over_message() {
        let err = api(json!({"detail": "No autorizado", "message": "otro"}));
        assert_eq!(err.user_message("fallback"), "No autorizado");
    }

    #[test]
    fn test_message_used_when_detail_missing() {
        let err = api(json!({"message": "Unidad ocupada"}));
        assert_eq!(err.user_message("fallback"), "Unidad ocupada");
    }

    #[test]
    fn test_fallback_for_transport_errors() {
        assert_eq!(AppError::NotFound.user_message("Error al cargar"), "Error al cargar");
        assert_eq!(api(json!(["x"])).user_message("Error"), "Error");
    }

    #[test]
    fn test_field_errors_join_lists() {
        let err = api(json!({"name": ["Requerido.", "Muy corto."], "code": "Duplicado"}));
        let errors = err.field_errors().unwrap();
        assert_eq!(errors["name"], "Requerido. Muy corto.");
        assert_eq!(errors["code"], "Duplicado");
    }

    #[test]
    fn test_client_side_field_error() {
        let err = AppError::InvalidField {
            field: "amount".into(),
            message: "must be a number".into(),
        };
        assert_eq!(err.field_errors().unwrap()["amount"], "must be a number");
    }

    #[test]
    fn test_field_errors_absent_without_body() {
        let err = AppError::Api {
            status: 500,
            body: None,
        };
        assert!(err.field_errors().is_none());
        assert!(AppError::Cancelled.field_errors().is_none());
    }
}
