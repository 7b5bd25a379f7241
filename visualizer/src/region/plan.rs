//! Region plans: the ordered list of regions to segment
//!
//! Order matters: later regions are blended on top of earlier ones.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::types::{BoundingBox, ConfigurationError, Region, RegionKind};

/// Boxes for the four cats in the reference photo
const CAT_BBOXES: [[i64; 4]; 4] = [
    [40, 100, 130, 300],
    [130, 100, 220, 300],
    [220, 100, 310, 300],
    [310, 100, 400, 300],
];

/// Log the cats are sitting on
const SURFACE_BBOX: [i64; 4] = [0, 300, 640, 360];

/// Strip above the cats
const BACKGROUND_BBOX: [i64; 4] = [0, 0, 640, 100];

/// Reference plan: cats, then surface, then background
pub fn reference_plan() -> Vec<Region> {
    CAT_BBOXES
        .iter()
        .map(|&bbox| Region::new(RegionKind::Cat, bbox.into()))
        .chain([
            Region::new(RegionKind::Surface, SURFACE_BBOX.into()),
            Region::new(RegionKind::Background, BACKGROUND_BBOX.into()),
        ])
        .collect()
}

/// Plan file entry; labels stay strings until validated
#[derive(Debug, Deserialize)]
struct PlanEntry {
    label: String,
    bbox: BoundingBox,
}

/// Parse a JSON plan: `[{"label": "cat", "bbox": [x0, y0, x1, y1]}, ...]`
pub fn parse_plan(json: &str) -> Result<Vec<Region>, ConfigurationError> {
    let entries: Vec<PlanEntry> =
        serde_json::from_str(json).map_err(|e| ConfigurationError::InvalidPlan(e.to_string()))?;

    entries
        .into_iter()
        .map(|entry| {
            let kind: RegionKind = entry.label.parse()?;
            Ok::<_, ConfigurationError>(Region::new(kind, entry.bbox))
        })
        .collect()
}

/// Load and validate a plan file
pub fn load_plan(path: &Path) -> Result<Vec<Region>, ConfigurationError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigurationError::ReadPlan {
        path: path.display().to_string(),
        source,
    })?;
    let regions = parse_plan(&json)?;
    info!("Loaded {} regions from {:?}", regions.len(), path);
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_plan_order() {
        let plan = reference_plan();
        let kinds: Vec<RegionKind> = plan.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RegionKind::Cat,
                RegionKind::Cat,
                RegionKind::Cat,
                RegionKind::Cat,
                RegionKind::Surface,
                RegionKind::Background,
            ]
        );
        assert_eq!(plan[0].bbox, BoundingBox::new(40, 100, 130, 300));
        assert_eq!(plan[5].bbox, BoundingBox::new(0, 0, 640, 100));
    }

    #[test]
    fn test_parse_plan_preserves_order() {
        let plan = parse_plan(
            r#"[
                {"label": "background", "bbox": [0, 0, 10, 10]},
                {"label": "cat", "bbox": [1, 2, 3, 4]}
            ]"#,
        )
        .unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].kind, RegionKind::Background);
        assert_eq!(plan[1], Region::new(RegionKind::Cat, BoundingBox::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_parse_plan_rejects_unknown_label() {
        let err = parse_plan(r#"[{"label": "dog", "bbox": [0, 0, 1, 1]}]"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownLabel(_)));
    }

    #[test]
    fn test_parse_plan_rejects_malformed_bbox() {
        let err = parse_plan(r#"[{"label": "cat", "bbox": [0, 0, 1]}]"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPlan(_)));
    }

    #[test]
    fn test_load_plan_missing_file() {
        let err = load_plan(Path::new("/nonexistent/regions.json")).unwrap_err();
        assert!(matches!(err, ConfigurationError::ReadPlan { .. }));
    }
}
