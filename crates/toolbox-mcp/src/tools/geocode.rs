//! Tool: geocode — Resolve a place name to coordinates.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use toolbox::GeocodeClient;

use super::{HandlerResult, ToolHandler, ToolSpec};
use crate::schema::{parse_arguments, FieldSchema, InputSchema};
use crate::types::ToolContent;

#[derive(Debug, Deserialize)]
struct GeocodeParams {
    query: String,
}

pub fn spec() -> ToolSpec {
    ToolSpec::new(
        "geocode",
        "장소 이름이나 주소로 위도와 경도를 찾습니다",
        InputSchema::new(vec![
            FieldSchema::string("query").describe("검색할 장소 이름 또는 주소")
        ]),
    )
}

pub struct Geocode {
    client: GeocodeClient,
}

impl Geocode {
    pub fn new(client: GeocodeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for Geocode {
    async fn call(&self, args: Value) -> HandlerResult<Vec<ToolContent>> {
        let params: GeocodeParams = parse_arguments(args)?;
        let place = self.client.search(&params.query).await?;
        Ok(vec![ToolContent::text(place.to_string())])
    }
}
