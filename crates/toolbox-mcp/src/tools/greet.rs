//! Tool: greet — Greet a person in Korean or English.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use toolbox::Language;

use super::{HandlerResult, ToolHandler, ToolSpec};
use crate::schema::{parse_arguments, FieldSchema, InputSchema};
use crate::types::ToolContent;

#[derive(Debug, Deserialize)]
struct GreetParams {
    name: String,
    #[serde(default)]
    language: Language,
}

pub fn spec() -> ToolSpec {
    ToolSpec::new(
        "greet",
        "이름과 언어를 받아 인사말을 반환합니다",
        InputSchema::new(vec![
            FieldSchema::string("name").describe("인사할 사람의 이름"),
            FieldSchema::string("language")
                .describe("인사 언어 (ko 또는 en)")
                .one_of(Language::CODES)
                .default_value(json!("en")),
        ]),
    )
}

pub struct Greet;

#[async_trait]
impl ToolHandler for Greet {
    async fn call(&self, args: Value) -> HandlerResult<Vec<ToolContent>> {
        let params: GreetParams = parse_arguments(args)?;
        Ok(vec![ToolContent::text(params.language.greet(&params.name))])
    }
}
