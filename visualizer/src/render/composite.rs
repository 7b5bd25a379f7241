//! Alpha "over" compositing of RGBA rasters

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Errors that can occur when compositing
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("Dimension mismatch: destination {dst_w}x{dst_h}, source {src_w}x{src_h}")]
    DimensionMismatch {
        dst_w: u32,
        dst_h: u32,
        src_w: u32,
        src_h: u32,
    },
}

/// Composite one source pixel over one destination pixel
///
/// `out_a = sa + da(1 - sa)`, colors are alpha-weighted and renormalized by
/// `out_a`. A fully transparent result is all zeros.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src.0[3] as f32 / 255.0;
    let da = dst.0[3] as f32 / 255.0;
    let dst_weight = da * (1.0 - sa);
    let out_a = sa + dst_weight;

    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| -> u8 {
        let c = (s as f32 * sa + d as f32 * dst_weight) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src.0[0], dst.0[0]),
        channel(src.0[1], dst.0[1]),
        channel(src.0[2], dst.0[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Composite `source` over `destination`, returning a new raster
///
/// Pure: neither input is modified.
pub fn blend_onto(
    destination: &RgbaImage,
    source: &RgbaImage,
) -> Result<RgbaImage, CompositeError> {
    if destination.dimensions() != source.dimensions() {
        return Err(CompositeError::DimensionMismatch {
            dst_w: destination.width(),
            dst_h: destination.height(),
            src_w: source.width(),
            src_h: source.height(),
        });
    }

    let mut out = destination.clone();
    for (dst, src) in out.pixels_mut().zip(source.pixels()) {
        *dst = over(*dst, *src);
    }
    Ok(out)
}
