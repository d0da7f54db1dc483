//! Tool: time — Current time at a fixed UTC offset.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use toolbox::clock::TIMEZONE_PATTERN;
use toolbox::UtcOffset;

use super::{HandlerResult, ToolHandler, ToolSpec};
use crate::schema::{parse_arguments, FieldSchema, InputSchema};
use crate::types::{McpResult, ToolContent};

#[derive(Debug, Deserialize)]
struct TimeParams {
    timezone: String,
}

pub fn spec() -> McpResult<ToolSpec> {
    Ok(ToolSpec::new(
        "time",
        "UTC 오프셋 시간대의 현재 시각을 반환합니다",
        InputSchema::new(vec![FieldSchema::string("timezone")
            .describe("시간대 (예: UTC+9, UTC-5)")
            .pattern(TIMEZONE_PATTERN)?]),
    ))
}

pub struct CurrentTime;

#[async_trait]
impl ToolHandler for CurrentTime {
    async fn call(&self, args: Value) -> HandlerResult<Vec<ToolContent>> {
        let params: TimeParams = parse_arguments(args)?;
        let offset = UtcOffset::parse(&params.timezone)?;
        Ok(vec![ToolContent::text(offset.describe(Utc::now())?)])
    }
}
