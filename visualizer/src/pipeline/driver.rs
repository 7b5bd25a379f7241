//! Pipeline driver
//!
//! Owns the base image and the overlay accumulator. Regions are processed
//! strictly in the order given; the overlay only changes after a region has
//! fully succeeded.

use image::{GrayImage, RgbaImage};
use tracing::{info, warn};

use crate::region::Region;
use crate::render::{blend_onto, colorize};
use crate::segment::{RegionError, RegionRequestDispatcher};

use super::report::{RegionOutcome, RegionStatus, RunReport};

pub struct PipelineDriver {
    base: RgbaImage,
    overlay: RgbaImage,
    outcomes: Vec<RegionOutcome>,
}

impl PipelineDriver {
    /// Start a run over `base` with a fully transparent overlay
    pub fn new(base: RgbaImage) -> Self {
        let overlay = RgbaImage::new(base.width(), base.height());
        Self {
            base,
            overlay,
            outcomes: Vec::new(),
        }
    }

    pub fn overlay(&self) -> &RgbaImage {
        &self.overlay
    }

    pub fn outcomes(&self) -> &[RegionOutcome] {
        &self.outcomes
    }

    /// Colorize a decoded mask and blend it on top of the overlay
    pub fn apply_mask(&mut self, mask: &GrayImage, color: [u8; 3]) -> Result<(), RegionError> {
        let layer = colorize(mask, color, self.base.dimensions());
        self.overlay = blend_onto(&self.overlay, &layer)?;
        Ok(())
    }

    /// Record the outcome of one region, applying its mask on success
    pub fn record(&mut self, region: &Region, result: Result<GrayImage, RegionError>) {
        let status = match result.and_then(|mask| self.apply_mask(&mask, region.color())) {
            Ok(()) => {
                info!("Applied mask for {} {}", region.label(), region.bbox);
                RegionStatus::Applied
            }
            Err(e) => {
                warn!(
                    "Failed to apply mask for {} {}: {}",
                    region.label(),
                    region.bbox,
                    e
                );
                RegionStatus::Skipped(e)
            }
        };

        self.outcomes.push(RegionOutcome {
            region: *region,
            status,
        });
    }

    /// Dispatch and record every region, in order
    pub async fn process_regions(
        &mut self,
        dispatcher: &RegionRequestDispatcher,
        image_ref: &str,
        regions: &[Region],
    ) {
        for region in regions {
            let result = dispatcher.dispatch(region, image_ref).await;
            self.record(region, result);
        }
    }

    /// Blend the overlay onto the base image
    pub fn finish(self) -> RunReport {
        // Overlay is allocated from the base dimensions, so this cannot mismatch
        let composite = match blend_onto(&self.base, &self.overlay) {
            Ok(composite) => composite,
            Err(e) => {
                warn!("Final blend failed, returning base image: {}", e);
                self.base
            }
        };

        RunReport {
            composite,
            overlay: self.overlay,
            outcomes: self.outcomes,
        }
    }

    /// Full run: process `regions` then finalize
    pub async fn run(
        base: RgbaImage,
        dispatcher: &RegionRequestDispatcher,
        image_ref: &str,
        regions: &[Region],
    ) -> RunReport {
        let mut driver = Self::new(base);
        driver.process_regions(dispatcher, image_ref, regions).await;
        driver.finish()
    }
}
