// src/camera/device.rs
//
// Media device seam
//
// `MediaDevices` hands out a live `MediaStream`; whoever holds the stream
// owns its tracks and must stop them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CameraConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    #[error("Camera is not streaming")]
    NotStreaming,

    #[error("No video frame available yet")]
    FrameUnavailable,

    #[error("Invalid frame: expected {expected} bytes, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },

    #[error("Frame encoding failed: {0}")]
    Encoding(String),

    #[error("Camera did not answer within {0} seconds")]
    Timeout(u64),

    #[error("Camera request cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    User,
    Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    pub width: u32,
    pub height: u32,
    pub facing_mode: FacingMode,
}

impl From<&CameraConfig> for VideoConstraints {
    fn from(config: &CameraConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            facing_mode: FacingMode::User,
        }
    }
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self::from(&CameraConfig::default())
    }
}

/// One RGBA video frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn get_user_media(
        &self,
        constraints: &VideoConstraints,
    ) -> Result<Box<dyn MediaStream>, CameraError>;
}

pub trait MediaStream: Send {
    /// Live tracks; zero once stopped
    fn track_count(&self) -> usize;

    fn current_frame(&mut self) -> Result<VideoFrame, CameraError>;

    fn stop_tracks(&mut self);
}
