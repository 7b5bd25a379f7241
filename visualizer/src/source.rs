//! Base image loading
//!
//! `http://` and `https://` references are downloaded, anything else is read
//! from the local filesystem. The result is always RGBA8.

use bytes::Bytes;
use image::RgbaImage;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading the base image
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to decode base image: {0}")]
    Decode(#[from] image::ImageError),
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<Bytes, SourceError> {
    let fetch_error = |reason: String| SourceError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;
    if !response.status().is_success() {
        return Err(fetch_error(format!("HTTP {}", response.status())));
    }
    response.bytes().await.map_err(|e| fetch_error(e.to_string()))
}

/// Decode raw image bytes into RGBA8
pub fn decode_base_image(raw: &[u8]) -> Result<RgbaImage, SourceError> {
    Ok(image::load_from_memory(raw)?.into_rgba8())
}

/// Load the base image from a URL or local path
pub async fn load_base_image(
    client: &reqwest::Client,
    reference: &str,
) -> Result<RgbaImage, SourceError> {
    let raw = if is_remote(reference) {
        fetch(client, reference).await?
    } else {
        Bytes::from(tokio::fs::read(reference).await?)
    };

    let image = decode_base_image(&raw)?;
    info!(
        "Loaded base image {} ({}x{})",
        reference,
        image.width(),
        image.height()
    );
    Ok(image)
}
