//! Tool: get-weather — Current conditions and a daily forecast.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use toolbox::weather::{DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS};
use toolbox::WeatherClient;

use super::{HandlerResult, ToolHandler, ToolSpec};
use crate::schema::{parse_arguments, FieldSchema, InputSchema};
use crate::types::ToolContent;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherParams {
    latitude: f64,
    longitude: f64,
    forecast_days: u8,
}

pub fn spec() -> ToolSpec {
    ToolSpec::new(
        "get-weather",
        "위도와 경도로 현재 날씨와 일별 예보를 조회합니다",
        InputSchema::new(vec![
            FieldSchema::number("latitude")
                .describe("위도 (-90 ~ 90)")
                .range(-90.0, 90.0),
            FieldSchema::number("longitude")
                .describe("경도 (-180 ~ 180)")
                .range(-180.0, 180.0),
            FieldSchema::integer("forecastDays")
                .describe("예보 일수 (1 ~ 16)")
                .range(1.0, f64::from(MAX_FORECAST_DAYS))
                .default_value(json!(DEFAULT_FORECAST_DAYS)),
        ]),
    )
}

pub struct GetWeather {
    client: WeatherClient,
}

impl GetWeather {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetWeather {
    async fn call(&self, args: Value) -> HandlerResult<Vec<ToolContent>> {
        let params: WeatherParams = parse_arguments(args)?;
        let forecast = self
            .client
            .forecast(params.latitude, params.longitude, params.forecast_days)
            .await?;
        let text = forecast.render(
            params.latitude,
            params.longitude,
            usize::from(params.forecast_days),
        );
        Ok(vec![ToolContent::text(text)])
    }
}
