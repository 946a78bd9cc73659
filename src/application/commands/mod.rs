// src/application/commands/mod.rs
//
// Tauri Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the webview and page view-models
// - Commands accept DTOs and return views
// - Commands handle error conversion for Tauri
// - Commands NEVER contain business logic

pub mod camera_commands;
pub mod page_commands;

pub use camera_commands::*;
pub use page_commands::*;
