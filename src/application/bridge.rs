// src/application/bridge.rs
//
// Tauri adapters for the seams the core depends on
//
// - `EventNotifier`: toasts become webview events
// - `TauriCameraChannel`: camera open/stop requests become webview events
// - `TauriConfirm`: confirmations become native message boxes

use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use uuid::Uuid;

use super::dto::{
    CameraOpenPayload, CameraStopPayload, ToastDismissPayload, ToastPayload, CAMERA_OPEN_EVENT,
    CAMERA_STOP_EVENT, TOAST_DISMISS_EVENT, TOAST_SHOW_EVENT,
};
use crate::camera::{CameraChannel, VideoConstraints};
use crate::notify::{LogNotifier, Notifier, ToastId, ToastKind};
use crate::pages::ConfirmPrompt;

fn emit<S: serde::Serialize + Clone>(app: &AppHandle, event: &str, payload: S) {
    if let Err(e) = app.emit(event, payload) {
        log::warn!("Failed to emit {}: {}", event, e);
    }
}

pub struct EventNotifier {
    app: AppHandle,
    log: LogNotifier,
}

impl EventNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            log: LogNotifier,
        }
    }

    fn show(&self, id: ToastId, kind: ToastKind, message: &str) -> ToastId {
        emit(
            &self.app,
            TOAST_SHOW_EVENT,
            ToastPayload {
                id,
                kind,
                message: message.to_string(),
            },
        );
        id
    }
}

impl Notifier for EventNotifier {
    fn success(&self, message: &str) -> ToastId {
        let id = self.log.success(message);
        self.show(id, ToastKind::Success, message)
    }

    fn error(&self, message: &str) -> ToastId {
        let id = self.log.error(message);
        self.show(id, ToastKind::Error, message)
    }

    fn loading(&self, message: &str) -> ToastId {
        let id = self.log.loading(message);
        self.show(id, ToastKind::Loading, message)
    }

    fn dismiss(&self, id: ToastId) {
        self.log.dismiss(id);
        emit(&self.app, TOAST_DISMISS_EVENT, ToastDismissPayload { id });
    }
}

pub struct TauriCameraChannel {
    app: AppHandle,
}

impl TauriCameraChannel {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl CameraChannel for TauriCameraChannel {
    fn request_open(&self, request_id: Uuid, constraints: &VideoConstraints) {
        log::debug!("requesting camera stream {}", request_id);
        emit(
            &self.app,
            CAMERA_OPEN_EVENT,
            CameraOpenPayload {
                request_id,
                constraints: constraints.clone(),
            },
        );
    }

    fn request_stop(&self, stream_id: Uuid) {
        log::debug!("stopping camera stream {}", stream_id);
        emit(&self.app, CAMERA_STOP_EVENT, CameraStopPayload { stream_id });
    }
}

pub struct TauriConfirm {
    app: AppHandle,
}

impl TauriConfirm {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ConfirmPrompt for TauriConfirm {
    fn confirm(&self, message: &str) -> bool {
        let dialog = self
            .app
            .dialog()
            .message(message)
            .title("Confirm")
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel);

        // Commands run on the multi-threaded runtime; the dialog blocks
        tokio::task::block_in_place(|| dialog.blocking_show())
    }
}
