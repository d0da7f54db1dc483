//! Free-text place search against a Nominatim compatible endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::http::join_url;

const SERVICE: &str = "지오코딩 API";

/// Default geocoding endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// A single search hit. Coordinates are kept as the upstream decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "검색 결과: {}\n위도: {}\n경도: {}",
            self.display_name, self.lat, self.lon
        )
    }
}

/// Client for the geocoding search endpoint.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Return the best match for `query`.
    pub async fn search(&self, query: &str) -> DomainResult<Place> {
        let url = join_url(&self.base_url, "search");
        log::debug!("Geocoding query: {query}");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| DomainError::from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Geocoding request failed with HTTP {status}");
            return Err(DomainError::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| DomainError::from_reqwest(SERVICE, e))?;

        places
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::PlaceNotFound(query.to_string()))
    }
}
