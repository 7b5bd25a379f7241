//! Mask payload decoding
//!
//! The segmentation service returns each mask as a base64-encoded raster
//! (usually PNG). Decoding yields a single-channel image where any value
//! above zero marks the pixel as inside the region.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while decoding a mask payload
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Mask payload is empty")]
    EmptyPayload,

    #[error("Invalid base64 in mask payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsupported or malformed mask image: {0}")]
    InvalidImage(#[from] image::ImageError),
}

/// Decode base64 text into raw image bytes
///
/// Accepts an optional `data:<mime>;base64,` prefix and ignores embedded
/// whitespace such as line wrapping.
pub fn decode_payload(encoded: &str) -> Result<Bytes, DecodeError> {
    let body = match encoded.trim().split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded.trim(),
    };

    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    Ok(Bytes::from(STANDARD.decode(compact.as_bytes())?))
}

/// Narrow 16-bit samples by clipping at 255
///
/// Rescaling would turn small labels (e.g. 0/1 masks) into zeros.
fn clip_luma16(mask: &ImageBuffer<Luma<u16>, Vec<u16>>) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        Luma([mask.get_pixel(x, y).0[0].min(255) as u8])
    })
}

/// Decode a mask payload into an 8-bit grayscale raster
pub fn decode_mask(encoded: &str) -> Result<GrayImage, DecodeError> {
    let raw = decode_payload(encoded)?;
    let mask = match image::load_from_memory(&raw)? {
        DynamicImage::ImageLuma16(buffer) => clip_luma16(&buffer),
        wide @ (DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_)) => clip_luma16(&wide.to_luma16()),
        other => other.into_luma8(),
    };
    debug!(
        "Decoded mask: {} bytes -> {}x{}",
        raw.len(),
        mask.width(),
        mask.height()
    );
    Ok(mask)
}
