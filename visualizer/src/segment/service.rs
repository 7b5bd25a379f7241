//! SegmentationService trait definition

use async_trait::async_trait;

use super::types::{RequestError, SegmentRequest, SegmentResponse};

/// Trait for segmentation backends (remote HTTP service or test doubles)
#[async_trait]
pub trait SegmentationService: Send + Sync {
    /// Predict candidate masks for one bounding box
    async fn predict_with_bbox(
        &self,
        request: &SegmentRequest,
    ) -> Result<SegmentResponse, RequestError>;
}
