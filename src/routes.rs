use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use futures::FutureExt;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::error::TryOnError;
use crate::gallery;
use crate::models::{ClothesGallery, GalleryImages, TryOnRequest, TryOnResponse};
use crate::ui;
use crate::vertex::TryOnService;

pub const FAILED_TO_PROCESS: &str = "Failed to process request";

pub struct AppState {
    pub try_on: Arc<dyn TryOnService>,
    /// Static files and sample galleries.
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(try_on: Arc<dyn TryOnService>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            try_on,
            public_dir: public_dir.into(),
        }
    }
}

pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let public = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/", get(ui::index))
        .route("/try-on", post(try_on))
        .route("/api/try-on", post(try_on))
        .route("/api/images/person", get(person_images))
        .route("/api/images/clothes", get(clothes_images))
        .fallback_service(public)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

/// Parses and validates a raw `POST /try-on` body, then runs the try-on service.
///
/// 400 for unparseable or incomplete requests (the service is not called),
/// 500 when the service reports a failure or panics, 200 otherwise.
pub async fn handle_try_on(
    service: &dyn TryOnService,
    body: &[u8],
) -> (StatusCode, TryOnResponse) {
    let request: TryOnRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "try-on request body is not valid JSON");
            let err = TryOnError::MalformedRequest(e);
            return (StatusCode::BAD_REQUEST, TryOnResponse::failure(err.user_message()));
        }
    };

    info!(
        person_image = !request.person_image.is_empty(),
        person_image_len = request.person_image.len(),
        product_images = request.product_images.len(),
        "try-on request received"
    );

    if !request.is_valid() {
        warn!("validation failed: missing images");
        return (
            StatusCode::BAD_REQUEST,
            TryOnResponse::failure(TryOnError::MissingImages.user_message()),
        );
    }

    match AssertUnwindSafe(service.generate(request)).catch_unwind().await {
        Ok(response) if response.success => (StatusCode::OK, response),
        Ok(response) => {
            warn!(error = ?response.error, "try-on call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, response)
        }
        Err(_) => {
            error!("try-on service panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                TryOnResponse::failure(FAILED_TO_PROCESS),
            )
        }
    }
}

async fn try_on(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> (StatusCode, Json<TryOnResponse>) {
    let (status, response) = handle_try_on(state.try_on.as_ref(), &body).await;
    (status, Json(response))
}

async fn person_images(State(state): State<Arc<AppState>>) -> (StatusCode, Json<GalleryImages>) {
    match gallery::person_images(&state.public_dir).await {
        Ok(images) => (StatusCode::OK, Json(images)),
        Err(e) => {
            error!(error = %e, "error reading person images");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(GalleryImages::default()))
        }
    }
}

async fn clothes_images(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ClothesGallery>) {
    match gallery::clothes_images(&state.public_dir).await {
        Ok(clothes) => (StatusCode::OK, Json(clothes)),
        Err(e) => {
            error!(error = %e, "error reading clothes images");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(gallery::empty_clothes()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records calls and answers with a fixed response.
    struct FakeTryOn {
        calls: AtomicUsize,
        response: TryOnResponse,
    }

    impl FakeTryOn {
        fn new(response: TryOnResponse) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TryOnService for FakeTryOn {
        async fn generate(&self, _request: TryOnRequest) -> TryOnResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    struct PanickingTryOn;

    #[async_trait]
    impl TryOnService for PanickingTryOn {
        async fn generate(&self, _request: TryOnRequest) -> TryOnResponse {
            panic!("bridge exploded");
        }
    }

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn valid_body() -> Vec<u8> {
        body(json!({
            "personImage": "data:image/png;base64,QUJD",
            "productImages": ["REVG"]
        }))
    }

    #[tokio::test]
    async fn success_maps_to_200() {
        let fake = FakeTryOn::new(TryOnResponse::success(vec!["data:image/png;base64,AAAA".into()]));
        let (status, response) = handle_try_on(&fake, &valid_body()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.success);
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn failure_maps_to_500_with_same_body() {
        let fake = FakeTryOn::new(TryOnResponse::failure("No predictions returned from API"));
        let (status, response) = handle_try_on(&fake, &valid_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, TryOnResponse::failure("No predictions returned from API"));
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn incomplete_requests_never_reach_the_service() {
        let cases = [
            json!({ "productImages": ["REVG"] }),
            json!({ "personImage": "", "productImages": ["REVG"] }),
            json!({ "personImage": "QUJD" }),
            json!({ "personImage": "QUJD", "productImages": [] }),
            json!({ "personImage": null, "productImages": null }),
        ];
        for case in cases {
            let fake = FakeTryOn::new(TryOnResponse::success(vec![]));
            let (status, response) = handle_try_on(&fake, &body(case.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "case: {case}");
            assert_eq!(
                response.error.as_deref(),
                Some("Person image and at least one product image are required")
            );
            assert_eq!(fake.calls(), 0, "case: {case}");
        }
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let fake = FakeTryOn::new(TryOnResponse::success(vec![]));
        let (status, response) = handle_try_on(&fake, b"{\"personImage\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Invalid request body"));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn panicking_service_is_500() {
        let (status, response) = handle_try_on(&PanickingTryOn, &valid_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, TryOnResponse::failure(FAILED_TO_PROCESS));
    }
}
