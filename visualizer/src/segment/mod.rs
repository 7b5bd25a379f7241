//! Segmentation service access
//!
//! This module provides:
//! - `SegmentationService` trait for abstracting the inference backend
//! - `HttpSegmentationService` for the remote bounding-box endpoint
//! - `RegionRequestDispatcher` turning a region into a decoded mask

mod dispatcher;
mod http;
mod service;
mod types;

pub use dispatcher::RegionRequestDispatcher;
pub use http::{HttpSegmentationService, build_client};
pub use service::SegmentationService;
pub use types::{
    MaskCandidate, MaskSelection, RegionError, RequestError, SegmentRequest, SegmentResponse,
};
