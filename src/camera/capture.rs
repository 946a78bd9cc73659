// src/camera/capture.rs
//
// Camera capture component
//
// STATES:
//   Closed ──open──▶ Opening ──granted──▶ Streaming
//      ▲                │                     │
//      └────denied──────┘◀──close / capture───┘
//
// RULES:
// - Tracks are stopped on every path out of Streaming, and on drop
// - A denied permission leaves the component Closed with an inline message
//   and an error toast
// - An open cancelled by the owner goes back to Closed quietly
// - A successful capture closes the camera and fires `on_close` once

use std::sync::Arc;

use serde::Serialize;

use super::device::{CameraError, MediaDevices, MediaStream, VideoConstraints};
use super::encoding::encode_jpeg_data_url;
use crate::notify::Notifier;

pub const CAMERA_ACCESS_ERROR: &str =
    "Could not access the camera. Check that permission was granted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraState {
    Closed,
    Opening,
    Streaming,
}

enum Inner {
    Closed,
    Opening,
    Streaming(Box<dyn MediaStream>),
}

type CaptureCallback = Box<dyn FnMut(String) + Send>;
type CloseCallback = Box<dyn FnMut() + Send>;

pub struct CameraCapture {
    devices: Arc<dyn MediaDevices>,
    notifier: Arc<dyn Notifier>,
    constraints: VideoConstraints,
    jpeg_quality: u8,
    inner: Inner,
    error: Option<String>,
    on_capture: CaptureCallback,
    on_close: CloseCallback,
}

impl CameraCapture {
    pub fn new(
        devices: Arc<dyn MediaDevices>,
        notifier: Arc<dyn Notifier>,
        constraints: VideoConstraints,
    ) -> Self {
        Self {
            devices,
            notifier,
            constraints,
            jpeg_quality: 90,
            inner: Inner::Closed,
            error: None,
            on_capture: Box::new(|_| {}),
            on_close: Box::new(|| {}),
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn on_capture<F>(mut self, callback: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        self.on_capture = Box::new(callback);
        self
    }

    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_close = Box::new(callback);
        self
    }

    pub fn state(&self) -> CameraState {
        match self.inner {
            Inner::Closed => CameraState::Closed,
            Inner::Opening => CameraState::Opening,
            Inner::Streaming(_) => CameraState::Streaming,
        }
    }

    /// Inline error shown under the preview
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Follow the `is_open` flag of the owner
    pub async fn set_open(&mut self, open: bool) -> Result<(), CameraError> {
        if open {
            self.open().await
        } else {
            self.close();
            Ok(())
        }
    }

    async fn open(&mut self) -> Result<(), CameraError> {
        if matches!(self.inner, Inner::Streaming(_)) {
            return Ok(());
        }

        self.error = None;
        self.inner = Inner::Opening;

        match self.devices.get_user_media(&self.constraints).await {
            Ok(stream) => {
                log::info!(
                    "camera streaming {}x{} ({} tracks)",
                    self.constraints.width,
                    self.constraints.height,
                    stream.track_count()
                );
                self.inner = Inner::Streaming(stream);
                Ok(())
            }
            Err(CameraError::Cancelled) => {
                log::debug!("camera open cancelled");
                self.inner = Inner::Closed;
                Err(CameraError::Cancelled)
            }
            Err(e) => {
                log::warn!("camera open failed: {}", e);
                self.inner = Inner::Closed;
                self.error = Some(CAMERA_ACCESS_ERROR.to_string());
                self.notifier.error(CAMERA_ACCESS_ERROR);
                Err(e)
            }
        }
    }

    /// Grab the current frame as a base64 JPEG, then close the camera.
    ///
    /// A frame that cannot be read or encoded leaves the camera streaming.
    pub fn capture(&mut self) -> Result<String, CameraError> {
        let Inner::Streaming(stream) = &mut self.inner else {
            return Err(CameraError::NotStreaming);
        };

        let frame = stream.current_frame()?;
        let image = encode_jpeg_data_url(&frame, self.jpeg_quality)?;

        self.release();
        (self.on_capture)(image.clone());
        (self.on_close)();

        Ok(image)
    }

    /// Explicit close. `on_close` fires only if the camera was not closed.
    pub fn close(&mut self) {
        let was_open = !matches!(self.inner, Inner::Closed);
        self.release();
        if was_open {
            (self.on_close)();
        }
    }

    fn release(&mut self) {
        if let Inner::Streaming(mut stream) = std::mem::replace(&mut self.inner, Inner::Closed) {
            stream.stop_tracks();
            log::debug!("camera tracks stopped");
        }
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        self.release();
    }
}
