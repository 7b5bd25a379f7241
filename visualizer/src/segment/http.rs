//! Segmentation service over HTTP

use async_trait::async_trait;
use tracing::debug;

use crate::config::ClientConfig;

use super::service::SegmentationService;
use super::types::{RequestError, SegmentRequest, SegmentResponse};

/// Longest error body kept in a `RequestError::Status`
const MAX_ERROR_BODY: usize = 512;

/// Build the HTTP client shared by the service and the image loader
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, RequestError> {
    reqwest::Client::builder()
        .user_agent(concat!("segviz/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .build()
        .map_err(RequestError::from)
}

/// Segmentation service reached with a JSON POST per bounding box
pub struct HttpSegmentationService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSegmentationService {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SegmentationService for HttpSegmentationService {
    async fn predict_with_bbox(
        &self,
        request: &SegmentRequest,
    ) -> Result<SegmentResponse, RequestError> {
        debug!("POST {} bbox={}", self.endpoint, request.bbox);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RequestError::InvalidResponse(e.to_string()))
    }
}
