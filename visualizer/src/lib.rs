//! Segmentation Overlay Visualizer Library
//!
//! Requests a mask per labeled bounding box from a segmentation service and
//! composes the masks into one color-coded overlay on the source image.

pub mod config;
pub mod mask;
pub mod output;
pub mod pipeline;
pub mod region;
pub mod render;
pub mod segment;
pub mod source;

// Re-export commonly used types
pub use mask::{DecodeError, decode_mask};
pub use pipeline::{PipelineDriver, RegionOutcome, RegionStatus, RunReport};
pub use region::{BoundingBox, ConfigurationError, Region, RegionKind};
pub use render::{MASK_OPACITY, blend_onto, colorize};
pub use segment::{
    HttpSegmentationService, MaskSelection, RegionError, RegionRequestDispatcher, RequestError,
    SegmentationService,
};
