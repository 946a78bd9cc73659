// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are what crosses the webview boundary, in either direction
// - Conversion into core types happens here, not in commands

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{CameraState, VideoConstraints, VideoFrame};
use crate::error::{AppError, AppResult};
use crate::notify::{ToastId, ToastKind};
use crate::pages::PageKind;

// ============================================================================
// PAGE EVENTS
// ============================================================================

/// Carries a `PageView` painted while a load is in flight
pub const PAGE_VIEW_EVENT: &str = "page://view";

// ============================================================================
// TOAST EVENTS
// ============================================================================

pub const TOAST_SHOW_EVENT: &str = "toast://show";
pub const TOAST_DISMISS_EVENT: &str = "toast://dismiss";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastPayload {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastDismissPayload {
    pub id: ToastId,
}

// ============================================================================
// CAMERA
// ============================================================================

pub const CAMERA_OPEN_EVENT: &str = "camera://open";
pub const CAMERA_STOP_EVENT: &str = "camera://stop";
pub const CAMERA_CLOSED_EVENT: &str = "camera://closed";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraOpenPayload {
    pub request_id: Uuid,
    pub constraints: VideoConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStopPayload {
    pub stream_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraStatusDto {
    pub state: CameraState,
    pub error: Option<String>,
}

/// One video frame read from a canvas: raw RGBA, base64-encoded
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDto {
    pub stream_id: Uuid,
    pub width: u32,
    pub height: u32,
    pub rgba: String,
}

impl FrameDto {
    pub fn into_frame(self) -> AppResult<(Uuid, VideoFrame)> {
        let rgba = STANDARD
            .decode(self.rgba.as_bytes())
            .map_err(|e| AppError::Validation(format!("Frame is not valid base64: {}", e)))?;

        Ok((
            self.stream_id,
            VideoFrame {
                width: self.width,
                height: self.height,
                rgba,
            },
        ))
    }
}

/// Where a captured photo goes besides being returned
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum CaptureTarget {
    /// Only return the image
    None,
    /// Put the image into a file field of the open form of a page
    Field { page: PageKind, field: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureDto {
    pub image: String,
}
