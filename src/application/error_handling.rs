// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → responses the webview can branch on
// - Provides consistent error format for UI
// - Field errors travel with the response so forms can show them inline
// - Logs errors for debugging

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    pub status: Option<u16>,
    pub field_errors: Option<BTreeMap<String, String>>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Record or page not found
    NotFound,

    /// Invalid input, client-side or rejected by the backend (400)
    Validation,

    /// Backend answered with another error status
    Api,

    /// Backend unreachable or timed out
    Network,

    /// Camera permission or capture failure
    Camera,

    /// Page left while the operation was running
    Cancelled,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details: None,
            status: None,
            field_errors: None,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        let field_errors = error.field_errors();

        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found"),

            AppError::Api { status, .. } => {
                let error_type = match status {
                    404 => ErrorType::NotFound,
                    400 | 422 => ErrorType::Validation,
                    _ => ErrorType::Api,
                };
                log::warn!("API error {}", status);

                Self {
                    status: Some(status),
                    field_errors,
                    ..Self::new(error_type, error.user_message("The server rejected the request"))
                }
            }

            AppError::Http(http_error) => {
                log::error!("HTTP error: {:?}", http_error);

                Self {
                    details: Some(http_error.to_string()),
                    ..Self::new(ErrorType::Network, "Could not reach the server")
                }
            }

            AppError::Validation(message) => Self::new(ErrorType::Validation, message),

            AppError::InvalidField { ref field, ref message } => Self {
                details: Some(format!("{}: {}", field, message)),
                field_errors,
                ..Self::new(ErrorType::Validation, "Some fields are invalid")
            },

            AppError::Camera(camera_error) => Self {
                details: Some(camera_error.to_string()),
                ..Self::new(ErrorType::Camera, "Camera operation failed")
            },

            AppError::Cancelled => Self::new(ErrorType::Cancelled, "Operation cancelled"),

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed")
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    details: Some(io_error.to_string()),
                    ..Self::new(ErrorType::Internal, "File system operation failed")
                }
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);

                Self {
                    details: Some(message),
                    ..Self::new(ErrorType::Internal, "Invalid configuration")
                }
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource))
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}
