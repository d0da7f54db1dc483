//! Tool: calculator — Four-function arithmetic.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use toolbox::{Calculation, Operator};

use super::{HandlerResult, ToolHandler, ToolSpec};
use crate::schema::{parse_arguments, FieldSchema, InputSchema};
use crate::types::ToolContent;

#[derive(Debug, Deserialize)]
struct CalculatorParams {
    num1: f64,
    num2: f64,
    operator: Operator,
}

pub fn spec() -> ToolSpec {
    ToolSpec::new(
        "calculator",
        "두 숫자와 연산자를 받아 계산 결과를 반환합니다",
        InputSchema::new(vec![
            FieldSchema::number("num1").describe("첫 번째 숫자"),
            FieldSchema::number("num2").describe("두 번째 숫자"),
            FieldSchema::string("operator")
                .describe("연산자 (+, -, *, /)")
                .one_of(Operator::ALL),
        ]),
    )
}

pub struct Calculator;

#[async_trait]
impl ToolHandler for Calculator {
    async fn call(&self, args: Value) -> HandlerResult<Vec<ToolContent>> {
        let params: CalculatorParams = parse_arguments(args)?;
        let calculation = Calculation::evaluate(params.num1, params.num2, params.operator)?;
        Ok(vec![ToolContent::text(calculation.to_string())])
    }
}
