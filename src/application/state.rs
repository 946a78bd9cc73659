// src/application/state.rs
//
// Application state managed by Tauri.
// Shared pieces are Arc-wrapped; the camera is a single component behind
// an async lock because opening it waits on the webview.

use std::sync::Arc;
use std::time::Duration;

use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;

use super::bridge::{EventNotifier, TauriCameraChannel, TauriConfirm};
use super::dto::CAMERA_CLOSED_EVENT;
use super::host::PageHost;
use crate::api::{ApiClient, FaceAttendanceClient};
use crate::camera::{CameraCapture, VideoConstraints, WebviewMediaDevices};
use crate::config::BackofficeConfig;
use crate::error::AppResult;
use crate::notify::Notifier;
use crate::pages::ConfirmPrompt;

pub struct AppState {
    pub config: BackofficeConfig,
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Arc<dyn ConfirmPrompt>,
    pub host: PageHost<ApiClient>,
    pub media: Arc<WebviewMediaDevices>,
    pub camera: Mutex<CameraCapture>,
    pub attendance: Arc<FaceAttendanceClient>,
}

impl AppState {
    pub fn new(config: BackofficeConfig, app: AppHandle) -> AppResult<Self> {
        let client = ApiClient::new(&config)?;
        let notifier: Arc<dyn Notifier> = Arc::new(EventNotifier::new(app.clone()));
        let media = Arc::new(
            WebviewMediaDevices::new(Arc::new(TauriCameraChannel::new(app.clone())))
                .with_open_timeout(Duration::from_secs(config.camera.open_timeout_secs)),
        );

        let closed_handle = app.clone();
        let camera = CameraCapture::new(
            media.clone(),
            notifier.clone(),
            VideoConstraints::from(&config.camera),
        )
        .with_quality(config.camera.jpeg_quality)
        .on_capture(|image| log::debug!("captured photo ({} bytes)", image.len()))
        .on_close(move || {
            if let Err(e) = closed_handle.emit(CAMERA_CLOSED_EVENT, ()) {
                log::warn!("Failed to emit {}: {}", CAMERA_CLOSED_EVENT, e);
            }
        });

        log::info!("Backend at {}", client.root());

        Ok(Self {
            host: PageHost::new(client.clone(), notifier.clone(), config.default_page_size),
            attendance: Arc::new(FaceAttendanceClient::new(client)),
            confirm: Arc::new(TauriConfirm::new(app)),
            notifier,
            media,
            camera: Mutex::new(camera),
            config,
        })
    }
}
