//! Tool: generate-image — Text-to-image generation.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use toolbox::{DomainError, ImageClient};

use super::{HandlerResult, ToolHandler, ToolSpec};
use crate::schema::{parse_arguments, FieldSchema, InputSchema};
use crate::types::ToolContent;

#[derive(Debug, Deserialize)]
struct ImageParams {
    prompt: String,
}

pub fn spec() -> ToolSpec {
    ToolSpec::new(
        "generate-image",
        "텍스트 프롬프트로 이미지를 생성해 base64 data URI로 반환합니다",
        InputSchema::new(vec![
            FieldSchema::string("prompt").describe("생성할 이미지에 대한 설명")
        ]),
    )
}

pub struct GenerateImage {
    client: ImageClient,
    token_env: String,
}

impl GenerateImage {
    pub fn new(client: ImageClient, token_env: &str) -> Self {
        Self {
            client,
            token_env: token_env.to_string(),
        }
    }

    /// Read from the environment on every call.
    fn token(&self) -> Result<String, DomainError> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DomainError::MissingCredential(self.token_env.clone()))
    }
}

#[async_trait]
impl ToolHandler for GenerateImage {
    async fn call(&self, args: Value) -> HandlerResult<Vec<ToolContent>> {
        let params: ImageParams = parse_arguments(args)?;
        let token = self.token()?;
        let image = self.client.generate(&params.prompt, &token).await?;
        tracing::debug!(
            "Generated {} byte image with {}",
            image.bytes.len(),
            self.client.model()
        );
        Ok(vec![ToolContent::text(image.data_uri())])
    }
}
