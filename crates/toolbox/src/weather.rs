//! Forecasts from an Open-Meteo compatible endpoint.

use std::borrow::Cow;
use std::fmt::Write as _;

use serde::Deserialize;

use crate::error::{DomainError, DomainResult};
use crate::http::join_url;

const SERVICE: &str = "날씨 API";

/// Default forecast endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Default and maximum number of forecast days.
pub const DEFAULT_FORECAST_DAYS: u8 = 7;
pub const MAX_FORECAST_DAYS: u8 = 16;

/// WMO weather interpretation codes.
static WEATHER_CODES: &[(i64, &str)] = &[
    (0, "맑음"),
    (1, "대체로 맑음"),
    (2, "부분적으로 흐림"),
    (3, "흐림"),
    (45, "안개"),
    (48, "서리 안개"),
    (51, "약한 이슬비"),
    (53, "보통 이슬비"),
    (55, "강한 이슬비"),
    (56, "약한 어는 이슬비"),
    (57, "강한 어는 이슬비"),
    (61, "약한 비"),
    (63, "보통 비"),
    (65, "강한 비"),
    (66, "약한 어는 비"),
    (67, "강한 어는 비"),
    (71, "약한 눈"),
    (73, "보통 눈"),
    (75, "강한 눈"),
    (77, "싸락눈"),
    (80, "약한 소나기"),
    (81, "보통 소나기"),
    (82, "강한 소나기"),
    (85, "약한 눈 소나기"),
    (86, "강한 눈 소나기"),
    (95, "뇌우"),
    (96, "약한 우박을 동반한 뇌우"),
    (99, "강한 우박을 동반한 뇌우"),
];

/// Every code with a fixed description.
pub fn known_codes() -> impl Iterator<Item = i64> {
    WEATHER_CODES.iter().map(|(code, _)| *code)
}

/// Human-readable description of a weather code.
pub fn describe_code(code: i64) -> Cow<'static, str> {
    WEATHER_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| Cow::Borrowed(*text))
        .unwrap_or_else(|| Cow::Owned(format!("날씨 코드: {code}")))
}

/// Current conditions block.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub weathercode: i64,
    pub windspeed: f64,
    pub winddirection: f64,
}

/// Column-oriented daily series.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyWeather {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub weathercode: Vec<Option<i64>>,
}

/// Forecast response body.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub daily: DailyWeather,
}

fn celsius(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}°C"))
}

impl Forecast {
    /// Render current conditions plus up to `days` daily lines.
    pub fn render(&self, latitude: f64, longitude: f64, days: usize) -> String {
        let current = &self.current_weather;
        let mut out = format!(
            "현재 날씨 (위도 {latitude}, 경도 {longitude}):\n\
             - 상태: {}\n\
             - 기온: {}°C\n\
             - 풍속: {}km/h\n\
             - 풍향: {}°\n",
            describe_code(current.weathercode),
            current.temperature,
            current.windspeed,
            current.winddirection,
        );

        let daily = &self.daily;
        let count = days.min(daily.time.len());
        if count == 0 {
            return out;
        }

        let _ = write!(out, "\n{count}일 예보:");
        for (i, date) in daily.time.iter().take(count).enumerate() {
            let description = daily
                .weathercode
                .get(i)
                .copied()
                .flatten()
                .map_or(Cow::Borrowed("-"), describe_code);
            let max = celsius(daily.temperature_2m_max.get(i).copied().flatten());
            let min = celsius(daily.temperature_2m_min.get(i).copied().flatten());

            let _ = write!(out, "\n- {date}: {description}, 최고 {max} / 최저 {min}");
            if let Some(rain) = daily.precipitation_sum.get(i).copied().flatten() {
                if rain > 0.0 {
                    let _ = write!(out, ", 강수량 {rain}mm");
                }
            }
        }

        out
    }
}

/// Client for the forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch current conditions and a `days`-day daily forecast.
    pub async fn forecast(&self, latitude: f64, longitude: f64, days: u8) -> DomainResult<Forecast> {
        let url = join_url(&self.base_url, "v1/forecast");
        log::debug!("Requesting forecast for ({latitude}, {longitude}), {days} days");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode"
                        .to_string(),
                ),
                ("timezone", "auto".to_string()),
                ("forecast_days", days.to_string()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Forecast request failed with HTTP {status}");
            return Err(DomainError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        response
            .json::<Forecast>()
            .await
            .map_err(|e| DomainError::from_reqwest(SERVICE, e))
    }
}
