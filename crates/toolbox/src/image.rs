//! Text-to-image generation through a Hugging Face style inference endpoint.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{DomainError, DomainResult};
use crate::http::join_url;

const SERVICE: &str = "이미지 생성 API";

/// Default inference endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Default text-to-image model.
pub const DEFAULT_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

/// Environment variable holding the API token by default.
pub const DEFAULT_TOKEN_ENV: &str = "HF_TOKEN";

/// MIME type assumed when the upstream omits `Content-Type`.
const FALLBACK_MIME: &str = "image/png";

/// Raw image bytes and their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Base64 payload without the `data:` prefix.
    pub fn base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:{mime};base64,{payload}` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64())
    }
}

/// Client for the image inference endpoint.
#[derive(Debug, Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate an image for `prompt`, authenticating with `token`.
    pub async fn generate(&self, prompt: &str, token: &str) -> DomainResult<GeneratedImage> {
        let url = join_url(&self.base_url, &format!("models/{}", self.model));
        log::debug!("Requesting image from {} ({} prompt chars)", self.model, prompt.chars().count());

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| DomainError::from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Image generation failed with HTTP {status}");
            return Err(DomainError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or(FALLBACK_MIME)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::from_reqwest(SERVICE, e))?;

        Ok(GeneratedImage {
            mime_type,
            bytes: bytes.to_vec(),
        })
    }
}
