// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between the webview (Tauri) and the page view-models
// - Adapts Tauri facilities to the core's seams (toasts, camera, dialogs)
// - Holds no business logic of its own

pub mod bridge;
pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod host;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use host::PageHost;
pub use state::AppState;
