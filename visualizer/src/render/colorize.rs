//! Mask colorization
//!
//! Turns a decoded mask into a translucent RGBA layer in the region color.

use image::imageops::{self, FilterType};
use image::{GrayImage, Rgba, RgbaImage};
use tracing::debug;

/// Alpha given to every pixel inside a region
pub const MASK_OPACITY: u8 = 150;

/// Resize a mask to exactly `width` x `height`
///
/// Nearest-neighbour keeps the mask binary; all that matters downstream is
/// zero versus non-zero.
pub fn resize_mask(mask: &GrayImage, width: u32, height: u32) -> GrayImage {
    if mask.dimensions() == (width, height) {
        return mask.clone();
    }
    debug!(
        "Resizing mask {}x{} -> {}x{}",
        mask.width(),
        mask.height(),
        width,
        height
    );
    imageops::resize(mask, width, height, FilterType::Nearest)
}

/// Build the layer for one region
///
/// RGB is `color` everywhere. Alpha is `MASK_OPACITY` where the resized mask
/// is `> 0`, and 0 elsewhere.
pub fn colorize(mask: &GrayImage, color: [u8; 3], (width, height): (u32, u32)) -> RgbaImage {
    let resized = resize_mask(mask, width, height);
    let [r, g, b] = color;

    RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if resized.get_pixel(x, y).0[0] > 0 {
            MASK_OPACITY
        } else {
            0
        };
        Rgba([r, g, b, alpha])
    })
}
