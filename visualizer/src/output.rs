//! Output artifact naming and writing

use std::path::{Path, PathBuf};

use chrono::Utc;
use image::RgbaImage;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Prefix of every generated output file
const OUTPUT_PREFIX: &str = "segmented_3regions";

/// Errors that can occur when writing the composite
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to encode composite: {0}")]
    Encode(#[from] image::ImageError),
}

/// Generate a fresh output file name
///
/// Unix seconds keep names sortable; the random suffix keeps two runs in the
/// same second apart.
pub fn unique_filename() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}.png",
        OUTPUT_PREFIX,
        Utc::now().timestamp(),
        &token[..8]
    )
}

/// Write the composite as PNG under `dir`, creating it if needed
pub fn write_composite(dir: &Path, composite: &RgbaImage) -> Result<PathBuf, OutputError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!("Created output directory: {:?}", dir);
    }

    let path = dir.join(unique_filename());
    composite.save_with_format(&path, image::ImageFormat::Png)?;
    Ok(path)
}
