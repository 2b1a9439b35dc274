use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::auth::{GoogleTokenProvider, TokenProvider};
use crate::config::{AuthConfig, VertexConfig};
use crate::error::TryOnError;
use crate::models::{
    ImageInput, PredictParameters, PredictRequest, PredictResponse, TryOnInstance, TryOnRequest,
    TryOnResponse,
};

/// Produces try-on images. Implementations report failures inside the
/// response instead of returning an error.
#[async_trait]
pub trait TryOnService: Send + Sync {
    async fn generate(&self, request: TryOnRequest) -> TryOnResponse;
}

/// Strips a `data:<mime>;base64,` prefix, keeping what follows the first comma.
pub fn normalize_image(image: &str) -> &str {
    match image.split_once(',') {
        Some((_, payload)) => payload,
        None => image,
    }
}

pub fn png_data_uri(payload: &str) -> String {
    format!("data:image/png;base64,{}", payload)
}

fn http_client(config: &VertexConfig) -> Result<reqwest::Client, TryOnError> {
    Ok(reqwest::Client::builder().timeout(config.timeout).build()?)
}

/// Vertex AI `virtual-try-on` predict client.
#[derive(Clone)]
pub struct VertexTryOn {
    http: reqwest::Client,
    config: VertexConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl VertexTryOn {
    pub fn new(http: reqwest::Client, config: VertexConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            http,
            config,
            tokens,
        }
    }

    /// One HTTP client with the configured timeout, shared by token and predict calls.
    pub fn from_config(config: VertexConfig, auth: AuthConfig) -> Result<Self, TryOnError> {
        let http = http_client(&config)?;
        let tokens = Arc::new(GoogleTokenProvider::new(http.clone(), auth));
        Ok(Self::new(http, config, tokens))
    }

    /// Like [`VertexTryOn::from_config`] with tokens from elsewhere.
    pub fn with_tokens(
        config: VertexConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, TryOnError> {
        let http = http_client(&config)?;
        Ok(Self::new(http, config, tokens))
    }

    async fn predict(&self, request: &TryOnRequest) -> Result<Vec<String>, TryOnError> {
        let project_id = self
            .config
            .project_id
            .as_deref()
            .ok_or(TryOnError::Configuration("GOOGLE_CLOUD_PROJECT"))?;

        let access_token = self.tokens.access_token().await.map_err(|e| {
            error!(error = %e, "error getting access token");
            TryOnError::Authentication(e)
        })?;

        let url = self.config.predict_url(project_id);

        let person_image = normalize_image(&request.person_image);
        let product_image = request
            .product_images
            .first()
            .map(|image| normalize_image(image))
            .unwrap_or_default();
        if request.product_images.len() > 1 {
            debug!(
                ignored = request.product_images.len() - 1,
                "only the first product image is sent"
            );
        }

        let sample_count = request.sample_count.filter(|n| *n > 0).unwrap_or(1);
        info!(
            person_image_len = person_image.len(),
            product_image_len = product_image.len(),
            sample_count,
            location = self.config.location(),
            "sending request to Vertex AI"
        );

        let payload = PredictRequest {
            instances: vec![TryOnInstance {
                person_image: ImageInput::new(person_image),
                product_images: vec![ImageInput::new(product_image)],
            }],
            parameters: PredictParameters { sample_count },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                status = status.as_u16(),
                %url,
                body = %body,
                "Vertex AI returned an error"
            );
            return Err(TryOnError::Upstream {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let result: PredictResponse = serde_json::from_str(&body)?;

        let images: Vec<String> = result
            .predictions
            .iter()
            .filter_map(|prediction| match &prediction.bytes_base64_encoded {
                Some(payload) if !payload.is_empty() => Some(png_data_uri(payload)),
                _ => {
                    warn!(
                        reason = prediction.rai_filtered_reason.as_deref().unwrap_or("unknown"),
                        "prediction without image bytes skipped"
                    );
                    None
                }
            })
            .collect();

        if images.is_empty() {
            return Err(TryOnError::NoPredictions);
        }

        Ok(images)
    }
}

#[async_trait]
impl TryOnService for VertexTryOn {
    async fn generate(&self, request: TryOnRequest) -> TryOnResponse {
        match self.predict(&request).await {
            Ok(images) => {
                info!(count = images.len(), "try-on images generated");
                TryOnResponse::success(images)
            }
            Err(e) => {
                error!(error = %e, "virtual try-on failed");
                TryOnResponse::failure(e.user_message())
            }
        }
    }
}
