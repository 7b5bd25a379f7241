//! Segmentation wire types and error definitions

use std::error::Error as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mask::DecodeError;
use crate::region::BoundingBox;
use crate::render::CompositeError;

/// Errors that can occur when talking to the segmentation service
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to connect: {0}")]
    Connect(String),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unparsable response: {0}")]
    InvalidResponse(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Whether `e` or anything in its source chain is a timeout
fn is_timeout(e: &reqwest::Error) -> bool {
    if e.is_timeout() {
        return true;
    }
    let mut source = e.source();
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>()
            && io.kind() == std::io::ErrorKind::TimedOut
        {
            return true;
        }
        source = err.source();
    }
    false
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if is_timeout(&e) {
            RequestError::Timeout(e.to_string())
        } else if e.is_connect() {
            RequestError::Connect(e.to_string())
        } else if e.is_decode() {
            RequestError::InvalidResponse(e.to_string())
        } else {
            RequestError::Transport(e.to_string())
        }
    }
}

/// Why a single region was skipped
///
/// Every variant is recoverable: the region is dropped and the run goes on.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("No mask returned")]
    NoMask,

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Composite(#[from] CompositeError),
}

/// Body of a bounding-box prediction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRequest {
    /// Source image reference, passed through untouched
    pub image: String,
    /// `[x_min, y_min, x_max, y_max]` in base-image pixels
    pub bbox: BoundingBox,
}

/// One candidate mask in a prediction response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaskCandidate {
    /// Base64-encoded raster
    #[serde(default)]
    pub mask: Option<String>,
    /// Optional quality estimate
    #[serde(default, alias = "iou", skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl MaskCandidate {
    pub fn new(mask: impl Into<String>) -> Self {
        Self {
            mask: Some(mask.into()),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Prediction response; a missing `masks` field means no masks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentResponse {
    #[serde(default)]
    pub masks: Vec<MaskCandidate>,
}

/// Which candidate to keep when the service returns several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskSelection {
    /// The first candidate, others are discarded
    #[default]
    First,
    /// The highest `score`; falls back to the first candidate when none is scored
    HighestScore,
}

impl MaskSelection {
    pub fn select<'a>(&self, masks: &'a [MaskCandidate]) -> Option<&'a MaskCandidate> {
        match self {
            MaskSelection::First => masks.first(),
            MaskSelection::HighestScore => {
                let mut best: Option<(&MaskCandidate, f32)> = None;
                for candidate in masks {
                    if let Some(score) = candidate.score
                        && best.is_none_or(|(_, top)| score > top)
                    {
                        best = Some((candidate, score));
                    }
                }
                best.map(|(c, _)| c).or_else(|| masks.first())
            }
        }
    }
}

impl FromStr for MaskSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(MaskSelection::First),
            "highest_score" | "highest-score" => Ok(MaskSelection::HighestScore),
            other => Err(format!("unknown mask selection: {}", other)),
        }
    }
}
