use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::MultipartRejection, rejection::BytesRejection, DefaultBodyLimit, Multipart,
        State,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{analyze_outcome, ingest, upload_outcome, Envelope, IngestError};
use crate::models::AnalyzeRequest;
use crate::services::{AnalysisError, ImageHost, VisionAnalyzer};

pub const LIVENESS_MESSAGE: &str =
    "Food Vision Relay - POST /upload an image, then POST /analyze its URL";

pub struct AppState {
    pub image_host: Arc<dyn ImageHost>,
    pub vision: Arc<dyn VisionAnalyzer>,
}

pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/upload", post(upload_handler))
        .route("/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .with_state(Arc::new(state))
}

async fn root_handler() -> &'static str {
    LIVENESS_MESSAGE
}

async fn health_check() -> &'static str {
    "OK"
}

async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Envelope {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => {
            log::warn!("⚠️ Upload is not a multipart form: {}", e);
            return IngestError::MissingImage.into();
        }
    };

    let image = match ingest(multipart).await {
        Ok(image) => image,
        Err(e) => return e.into(),
    };

    let result = state.image_host.host_image(image).await;
    match &result {
        Ok(url) => log::info!("✅ Image hosted at {}", url),
        Err(e) => log::error!("❌ Image host error: {}", e),
    }
    upload_outcome(result)
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Envelope {
    let Some(image_url) = image_url_from_body(body) else {
        log::warn!("⚠️ Analyze request without imageUrl");
        return AnalysisError::MissingUrl.into();
    };

    let result = state.vision.analyze_image(&image_url).await;
    if let Err(e) = &result {
        log::error!("❌ Vision analysis error for {}: {}", image_url, e);
    }
    analyze_outcome(result)
}

/// `imageUrl` from a JSON body, if it is there and non-empty. Unreadable or
/// non-JSON bodies count as having no URL.
fn image_url_from_body(body: Result<Bytes, BytesRejection>) -> Option<String> {
    let body = body.ok()?;
    serde_json::from_slice::<AnalyzeRequest>(&body)
        .ok()?
        .image_url
        .filter(|url| !url.is_empty())
}
