//! Screenshot capture options and raster encoding.
//!
//! The rasterizer hands back raw RGBA pixels; this module turns them
//! into the PNG data URL stored on the draft and, eventually, in the
//! report's `screenshot_url` field.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::FeedbackError;

/// Scale factor for full-surface captures. Reduced from 1.0 to keep
/// the encoded payload small.
pub const CAPTURE_SCALE: f32 = 0.8;

/// Options passed to the rasterizer.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub scale: f32,
    /// Load cross-origin images into the capture.
    pub cross_origin: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: CAPTURE_SCALE,
            cross_origin: true,
        }
    }
}

/// One captured raster: tightly packed 8-bit RGBA rows.
#[derive(Debug, Clone)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Encode a raster frame as a `data:image/png;base64,…` URL.
pub fn encode_data_url(frame: &RasterFrame) -> Result<String, FeedbackError> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.rgba.len() != expected {
        return Err(FeedbackError::Encode(format!(
            "Raster buffer size mismatch: expected {expected} bytes for {}x{}, got {}",
            frame.width,
            frame.height,
            frame.rgba.len()
        )));
    }

    let buffer = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba.clone())
        .ok_or_else(|| FeedbackError::Encode("Raster buffer rejected by image codec".into()))?;

    let mut png = Vec::new();
    buffer
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| FeedbackError::Encode(e.to_string()))?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
