//! Region types and error definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling the region plan
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Unknown region label: {0}")]
    UnknownLabel(String),

    #[error("Failed to read region plan {path}: {source}")]
    ReadPlan {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid region plan: {0}")]
    InvalidPlan(String),
}

/// Known region kinds, each with a fixed overlay color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Cat,
    Surface,
    Background,
}

impl RegionKind {
    /// All kinds, in reference processing order
    pub const ALL: [RegionKind; 3] = [RegionKind::Cat, RegionKind::Surface, RegionKind::Background];

    /// Overlay color as (r, g, b)
    pub fn color(self) -> [u8; 3] {
        match self {
            RegionKind::Cat => [0, 255, 0],
            RegionKind::Surface => [0, 0, 255],
            RegionKind::Background => [255, 0, 0],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionKind::Cat => "cat",
            RegionKind::Surface => "surface",
            RegionKind::Background => "background",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegionKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| ConfigurationError::UnknownLabel(s.to_string()))
    }
}

/// Axis-aligned box in base-image pixel coordinates
///
/// `x_min < x_max` and `y_min < y_max` are assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 4]", into = "[i64; 4]")]
pub struct BoundingBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl BoundingBox {
    pub const fn new(x_min: i64, y_min: i64, x_max: i64, y_max: i64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Wire representation `[x_min, y_min, x_max, y_max]`
    pub fn to_array(self) -> [i64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

impl From<[i64; 4]> for BoundingBox {
    fn from([x_min, y_min, x_max, y_max]: [i64; 4]) -> Self {
        Self::new(x_min, y_min, x_max, y_max)
    }
}

impl From<BoundingBox> for [i64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// One labeled segmentation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    pub bbox: BoundingBox,
}

impl Region {
    pub const fn new(kind: RegionKind, bbox: BoundingBox) -> Self {
        Self { kind, bbox }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn color(&self) -> [u8; 3] {
        self.kind.color()
    }
}
