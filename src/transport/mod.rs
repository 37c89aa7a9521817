//! The pluggable exchange layer underneath the HTTPS scout.
//!
//! Scouts never talk to an HTTP client directly; they hand a
//! [`TransportRequest`] to a [`Transport`] and time the exchange. Tests (and
//! embedders with exotic stacks) substitute their own implementation.

pub mod https;

pub use https::HttpsTransport;

use async_trait::async_trait;
use thiserror::Error;

/// One request as the scout describes it, transport-agnostic.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Metadata-only exchange: HEAD instead of GET, no body transfer.
    pub head_only: bool,
}

impl TransportRequest {
    /// The https URL for this request. A missing leading slash on the path is
    /// tolerated and normalized.
    pub fn url(&self) -> String {
        let separator = if self.path.starts_with('/') { "" } else { "/" };
        format!(
            "https://{}:{}{}{}",
            self.host, self.port, separator, self.path
        )
    }
}

/// What came back: transport-native status, already parsed, and the raw body
/// (empty for metadata-only exchanges).
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// The two fates of a failed exchange, which drive opposite behavior in the
/// scout: `Unreachable` becomes the unknown-sentinel measurement state,
/// `Failed` propagates to the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Name resolution failure, refused or interrupted connection, expired
    /// deadline: the target could not be reached or did not answer in full.
    #[error("target unreachable: {0}")]
    Unreachable(String),

    /// The exchange itself was defective (unbuildable request, undecodable
    /// response). Indicates a mistake, not a network condition.
    #[error("exchange failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one encrypted request/response exchange, returning only after
    /// the response has been received in full.
    async fn exchange(
        &self,
        request: &TransportRequest,
    ) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let request = TransportRequest {
            host: "example.test".to_string(),
            port: 8443,
            path: "/health".to_string(),
            head_only: false,
        };
        assert_eq!(request.url(), "https://example.test:8443/health");
    }

    #[test]
    fn test_request_url_normalizes_bare_path() {
        let request = TransportRequest {
            host: "example.test".to_string(),
            port: 443,
            path: "health".to_string(),
            head_only: true,
        };
        assert_eq!(request.url(), "https://example.test:443/health");
    }
}
