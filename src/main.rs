// src/main.rs

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use anyhow::Context;
use tauri::Manager;
use tracing_subscriber::EnvFilter;

use condo_backoffice::application::commands::*;
use condo_backoffice::application::state::AppState;
use condo_backoffice::config::BackofficeConfig;

fn main() -> anyhow::Result<()> {
    // 1. LOGGING
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. CONFIGURATION
    let config = BackofficeConfig::load().context("loading configuration")?;
    log::info!("Starting condo backoffice against {}", config.api_root());

    // 3. TAURI BOOTSTRAP
    // State needs the app handle for events and dialogs, so it is built in setup
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            let state = AppState::new(config, app.handle().clone())?;
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            app_info,
            page_mount,
            page_unmount,
            page_load,
            page_view,
            page_set_tab,
            page_search,
            page_open_create,
            page_open_edit,
            page_close_modal,
            page_change_field,
            page_submit,
            page_delete,
            camera_set_open,
            camera_status,
            camera_webview_answer,
            camera_push_frame,
            camera_capture,
            face_attendance_recognize,
        ])
        .run(tauri::generate_context!())
        .context("running tauri application")?;

    Ok(())
}
