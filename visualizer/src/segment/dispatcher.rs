//! Per-region request dispatch
//!
//! One request per region, one mask kept per response, decoded to a
//! grayscale raster. Every failure is reported as a `RegionError`.

use std::sync::Arc;
use std::time::Instant;

use image::GrayImage;
use tracing::debug;

use crate::mask::decode_mask;
use crate::region::Region;

use super::service::SegmentationService;
use super::types::{MaskSelection, RegionError, RequestError, SegmentRequest};

pub struct RegionRequestDispatcher {
    service: Arc<dyn SegmentationService>,
    selection: MaskSelection,
}

impl RegionRequestDispatcher {
    pub fn new(service: Arc<dyn SegmentationService>) -> Self {
        Self {
            service,
            selection: MaskSelection::default(),
        }
    }

    pub fn with_selection(mut self, selection: MaskSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Request, select and decode the mask for one region
    pub async fn dispatch(
        &self,
        region: &Region,
        image_ref: &str,
    ) -> Result<GrayImage, RegionError> {
        let request = SegmentRequest {
            image: image_ref.to_string(),
            bbox: region.bbox,
        };

        let start = Instant::now();
        let response = self.service.predict_with_bbox(&request).await?;
        debug!(
            "Service answered for {} {} with {} masks in {:?}",
            region.label(),
            region.bbox,
            response.masks.len(),
            start.elapsed()
        );

        let candidate = self
            .selection
            .select(&response.masks)
            .ok_or(RegionError::NoMask)?;
        let encoded = candidate.mask.as_deref().ok_or_else(|| {
            RequestError::InvalidResponse("mask candidate has no `mask` field".to_string())
        })?;

        Ok(decode_mask(encoded)?)
    }
}
