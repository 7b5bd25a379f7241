//! Overlay rendering
//!
//! - `colorize`: decoded mask + region color -> translucent layer
//! - `blend_onto`: standard alpha "over" of one raster onto another

mod colorize;
mod composite;

pub use colorize::{MASK_OPACITY, colorize, resize_mask};
pub use composite::{CompositeError, blend_onto, over};
