//! Domain failures, reported to clients as ordinary text content.

use thiserror::Error;

/// Prefix every rendered domain failure carries.
pub const ERROR_PREFIX: &str = "오류";

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// A failure inside a tool handler.
///
/// These never surface as protocol errors: the dispatcher renders them with
/// [`DomainError::render`] into the response content.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("0으로 나눌 수 없습니다.")]
    DivisionByZero,

    #[error("잘못된 시간대 형식입니다: {0} (예: UTC+9, UTC-5)")]
    InvalidTimezone(String),

    #[error("'{0}'에 대한 위치를 찾을 수 없습니다.")]
    PlaceNotFound(String),

    #[error("{service} 요청이 실패했습니다 (HTTP {status})")]
    UpstreamStatus { service: &'static str, status: u16 },

    #[error("{service} 요청 중 네트워크 오류가 발생했습니다: {message}")]
    Network {
        service: &'static str,
        message: String,
    },

    #[error("{service} 응답을 해석할 수 없습니다: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    #[error("{0} 환경 변수가 설정되지 않았습니다.")]
    MissingCredential(String),

    #[error("요청 시간이 초과되었습니다 ({0}초)")]
    Timeout(u64),
}

impl DomainError {
    /// Render as the user-facing `"오류: {message}"` text.
    pub fn render(&self) -> String {
        format!("{ERROR_PREFIX}: {self}")
    }

    /// Classify a transport-level `reqwest` failure for `service`.
    pub(crate) fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return DomainError::UpstreamStatus {
                service,
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return DomainError::Decode {
                service,
                message: err.to_string(),
            };
        }
        DomainError::Network {
            service,
            message: err.to_string(),
        }
    }
}
