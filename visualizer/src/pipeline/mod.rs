//! Mask acquisition and compositing pipeline

mod driver;
mod report;

pub use driver::PipelineDriver;
pub use report::{RegionOutcome, RegionStatus, RunReport};
