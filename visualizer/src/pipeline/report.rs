//! Run results

use image::RgbaImage;

use crate::region::Region;
use crate::segment::RegionError;

/// What happened to one region
#[derive(Debug)]
pub enum RegionStatus {
    Applied,
    Skipped(RegionError),
}

impl RegionStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, RegionStatus::Applied)
    }
}

#[derive(Debug)]
pub struct RegionOutcome {
    pub region: Region,
    pub status: RegionStatus,
}

/// Final result of a pipeline run
#[derive(Debug)]
pub struct RunReport {
    /// Overlay blended onto the base image
    pub composite: RgbaImage,
    /// Accumulated overlay on its own
    pub overlay: RgbaImage,
    /// One entry per region, in processing order
    pub outcomes: Vec<RegionOutcome>,
}

impl RunReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_applied()).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&Region, &RegionError)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            RegionStatus::Skipped(e) => Some((&o.region, e)),
            RegionStatus::Applied => None,
        })
    }
}
