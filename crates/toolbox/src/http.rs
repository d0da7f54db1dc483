//! Shared outbound HTTP client construction.

use std::time::Duration;

use crate::error::{DomainError, DomainResult};

/// Default per-request timeout when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the client every upstream call goes through.
///
/// All requests carry `user_agent` and are bounded by `timeout`.
pub fn build_client(user_agent: &str, timeout: Duration) -> DomainResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Network {
            service: "HTTP",
            message: e.to_string(),
        })
}

/// Join `base` and `path` with exactly one slash between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
