//! Prompt: code-review — Structured review request for a code snippet.

use serde::Deserialize;
use serde_json::Value;
use toolbox::ReviewRequest;

use super::{Prompt, PromptGenerator};
use crate::schema::{parse_arguments, FieldSchema, InputSchema};
use crate::types::{McpResult, PromptMessage};

#[derive(Debug, Deserialize)]
struct CodeReviewParams {
    code: String,
    language: Option<String>,
    focus: Option<String>,
}

pub fn prompt() -> Prompt {
    Prompt::new(
        "code-review",
        "코드 리뷰를 위한 구조화된 프롬프트를 생성합니다",
        InputSchema::new(vec![
            FieldSchema::string("code").describe("리뷰할 코드"),
            FieldSchema::string("language")
                .describe("프로그래밍 언어 (typescript, javascript, python, java, go)")
                .optional(),
            FieldSchema::string("focus")
                .describe("중점 검토 영역 (performance, security, readability)")
                .optional(),
        ]),
        CodeReview,
    )
}

pub struct CodeReview;

impl PromptGenerator for CodeReview {
    fn generate(&self, args: Value) -> McpResult<Vec<PromptMessage>> {
        let params: CodeReviewParams = parse_arguments(args)?;

        let mut request = ReviewRequest::new(params.code);
        if let Some(language) = params.language {
            request = request.with_language(language);
        }
        if let Some(focus) = params.focus {
            request = request.with_focus(focus);
        }

        Ok(vec![PromptMessage::user(request.render())])
    }
}
