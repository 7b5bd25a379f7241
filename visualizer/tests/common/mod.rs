//! Common Test Utilities for Integration Tests
//!
//! Shared helpers used across integration test modules.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use segviz::region::BoundingBox;
use segviz::segment::{
    MaskCandidate, RequestError, SegmentRequest, SegmentResponse, SegmentationService,
};
use tokio::sync::Mutex;

/// Encode a grayscale mask as base64 PNG
pub fn encode_mask(mask: &GrayImage) -> String {
    let mut buffer = Cursor::new(Vec::new());
    mask.write_to(&mut buffer, ImageFormat::Png)
        .expect("PNG encoding failed");
    STANDARD.encode(buffer.into_inner())
}

/// Mask of `width` x `height` that is 255 inside `bbox` and 0 outside
pub fn bbox_mask(width: u32, height: u32, bbox: BoundingBox) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let inside = x >= bbox.x_min && x < bbox.x_max && y >= bbox.y_min && y < bbox.y_max;
        Luma([if inside { 255 } else { 0 }])
    })
}

/// Mask covering every pixel
pub fn full_mask(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([255]))
}

/// Opaque solid base image
pub fn solid_base(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// Canned reply for one bounding box
#[derive(Clone)]
pub enum MockReply {
    Masks(Vec<MaskCandidate>),
    Status(u16),
    Timeout,
}

/// In-memory segmentation service keyed by bounding box
pub struct MockSegmentationService {
    replies: HashMap<[i64; 4], MockReply>,
    calls: Mutex<Vec<SegmentRequest>>,
}

impl MockSegmentationService {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(mut self, bbox: BoundingBox, reply: MockReply) -> Self {
        self.replies.insert(bbox.to_array(), reply);
        self
    }

    pub fn mask(self, bbox: BoundingBox, mask: &GrayImage) -> Self {
        self.reply(bbox, MockReply::Masks(vec![MaskCandidate::new(encode_mask(mask))]))
    }

    pub async fn calls(&self) -> Vec<SegmentRequest> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl SegmentationService for MockSegmentationService {
    async fn predict_with_bbox(
        &self,
        request: &SegmentRequest,
    ) -> Result<SegmentResponse, RequestError> {
        self.calls.lock().await.push(request.clone());

        match self.replies.get(&request.bbox.to_array()) {
            Some(MockReply::Masks(masks)) => Ok(SegmentResponse {
                masks: masks.clone(),
            }),
            Some(MockReply::Status(status)) => Err(RequestError::Status {
                status: *status,
                body: "mock failure".to_string(),
            }),
            Some(MockReply::Timeout) => Err(RequestError::Timeout("mock timeout".to_string())),
            None => Ok(SegmentResponse::default()),
        }
    }
}

/// Bounding boxes with special meaning to the fake inference server
pub mod fake_boxes {
    use segviz::region::BoundingBox;

    pub const EMPTY: BoundingBox = BoundingBox::new(0, 0, 1, 1);
    pub const SERVER_ERROR: BoundingBox = BoundingBox::new(999, 0, 1000, 1);
    pub const GARBAGE: BoundingBox = BoundingBox::new(777, 0, 778, 1);
    pub const SLOW: BoundingBox = BoundingBox::new(555, 0, 556, 1);
}

async fn fake_predict(Json(request): Json<SegmentRequest>) -> Response {
    match request.bbox {
        b if b == fake_boxes::EMPTY => Json(serde_json::json!({ "masks": [] })).into_response(),
        b if b == fake_boxes::SERVER_ERROR => {
            (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response()
        }
        b if b == fake_boxes::GARBAGE => (StatusCode::OK, "not json").into_response(),
        b if b == fake_boxes::SLOW => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(serde_json::json!({ "masks": [] })).into_response()
        }
        bbox => {
            // Quarter-resolution mask of the box on a 640x360 canvas
            let quarter = BoundingBox::new(
                bbox.x_min / 4,
                bbox.y_min / 4,
                bbox.x_max / 4,
                bbox.y_max / 4,
            );
            let mask = encode_mask(&bbox_mask(160, 90, quarter));
            Json(serde_json::json!({
                "masks": [
                    { "mask": mask, "score": 0.97 },
                    { "mask": encode_mask(&full_mask(4, 4)), "score": 0.42 },
                ]
            }))
            .into_response()
        }
    }
}

/// Start a fake inference server on a random port
pub async fn start_fake_service() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new().route("/sam/predict_with_bbox", post(fake_predict));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, handle)
}
