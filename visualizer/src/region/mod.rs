//! Region definitions and plans
//!
//! - `RegionKind`: closed set of labels with their overlay colors
//! - `Region`: a label plus the bounding box sent to the service
//! - plan loading from JSON, with the reference plan as fallback

mod plan;
mod types;

pub use plan::{load_plan, parse_plan, reference_plan};
pub use types::{BoundingBox, ConfigurationError, Region, RegionKind};
