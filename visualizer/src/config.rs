//! Visualizer configuration
//!
//! Configuration is loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::segment::MaskSelection;

/// Reference image used when `IMAGE_URL` is not set
pub const DEFAULT_IMAGE_URL: &str = "https://t3.ftcdn.net/jpg/05/82/56/80/360_F_582568095_j49qzM3AIbjr0GlNPOHRUJkfUuqVukuI.jpg";

/// Main visualizer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bounding-box prediction endpoint of the segmentation service
    pub sam_api_url: String,
    /// Source image reference (http(s) URL or local path)
    pub image_url: String,
    /// Directory the composite image is written to
    pub output_dir: PathBuf,
    /// Optional JSON region plan; the reference plan is used when unset
    pub regions_file: Option<PathBuf>,
    /// HTTP client configuration
    pub client: ClientConfig,
    /// Which candidate mask to keep when the service returns several
    pub mask_selection: MaskSelection,
}

/// HTTP client timeouts
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
    /// Time allowed between reads once connected
    pub read_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sam_api_url: "http://localhost:5000/sam/predict_with_bbox".to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            output_dir: PathBuf::from("."),
            regions_file: None,
            client: ClientConfig::default(),
            mask_selection: MaskSelection::First,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            // Inference on large boxes can be slow
            read_timeout: Duration::from_secs(120),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("SAM_API_URL")
            && !url.is_empty()
        {
            config.sam_api_url = url;
        }
        if let Some(url) = lookup("IMAGE_URL")
            && !url.is_empty()
        {
            config.image_url = url;
        }
        if let Some(dir) = lookup("OUTPUT_DIR")
            && !dir.is_empty()
        {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("REGIONS_FILE")
            && !path.is_empty()
        {
            config.regions_file = Some(PathBuf::from(path));
        }

        // Client config
        if let Some(val) = lookup("SAM_CONNECT_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.client.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(val) = lookup("SAM_READ_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.client.read_timeout = Duration::from_secs(secs);
        }

        if let Some(val) = lookup("MASK_SELECTION")
            && let Ok(selection) = val.parse()
        {
            config.mask_selection = selection;
        }

        config
    }
}
