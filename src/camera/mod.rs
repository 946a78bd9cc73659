// src/camera/mod.rs
//
// Camera capture
//
// - `device`: the media-device seam and its error type
// - `capture`: the open / stream / capture / close component
// - `encoding`: RGBA frame → base64 JPEG data URL
// - `webview`: `MediaDevices` backed by the webview's getUserMedia

pub mod capture;
pub mod device;
pub mod encoding;
pub mod webview;

pub use capture::{CameraCapture, CameraState, CAMERA_ACCESS_ERROR};
pub use device::{CameraError, FacingMode, MediaDevices, MediaStream, VideoConstraints, VideoFrame};
pub use encoding::{encode_jpeg_data_url, JPEG_DATA_URL_PREFIX};
pub use webview::{CameraChannel, WebviewAnswer, WebviewMediaDevices};
