// src/camera/encoding.rs
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

use super::device::{CameraError, VideoFrame};

pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Encode a frame as a `data:image/jpeg;base64,...` URL
pub fn encode_jpeg_data_url(frame: &VideoFrame, quality: u8) -> Result<String, CameraError> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.rgba.len() != expected || expected == 0 {
        return Err(CameraError::InvalidFrame {
            expected,
            actual: frame.rgba.len(),
        });
    }

    let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone()).ok_or(
        CameraError::InvalidFrame {
            expected,
            actual: frame.rgba.len(),
        },
    )?;

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| CameraError::Encoding(e.to_string()))?;

    Ok(format!("{}{}", JPEG_DATA_URL_PREFIX, STANDARD.encode(&jpeg)))
}
