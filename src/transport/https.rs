use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Transport, TransportError, TransportRequest, TransportResponse};
use crate::error::ScoutError;

const USER_AGENT: &str = concat!("oxyscout/", env!("CARGO_PKG_VERSION"));

/// The default transport: a reqwest client over rustls.
///
/// Deadline enforcement lives here, not in the scout; the scout's only timing
/// obligation is to measure honestly. With no deadline set, a hung connection
/// hangs the executing task, so schedulers that cannot tolerate that should
/// construct the transport with one.
pub struct HttpsTransport {
    client: Client,
}

impl HttpsTransport {
    pub fn new(trust_all_certificates: bool) -> Result<Self, ScoutError> {
        Self::build(trust_all_certificates, None)
    }

    /// A transport that aborts exchanges exceeding `deadline`. An aborted
    /// exchange is classified unreachable, like any other target that never
    /// answered in full.
    pub fn with_deadline(
        trust_all_certificates: bool,
        deadline: Duration,
    ) -> Result<Self, ScoutError> {
        Self::build(trust_all_certificates, Some(deadline))
    }

    fn build(
        trust_all_certificates: bool,
        deadline: Option<Duration>,
    ) -> Result<Self, ScoutError> {
        // No idle pool: the connection is scoped to one exchange, so nothing
        // lingers between invocations and every measurement includes
        // establishment.
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(trust_all_certificates);

        if let Some(deadline) = deadline {
            builder = builder.timeout(deadline);
        }

        let client = builder
            .build()
            .map_err(|e| ScoutError::Transport(format!("failed to build https client: {e}")))?;

        Ok(Self { client })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    // Builder and decode failures are defects in the exchange itself; all
    // remaining variants (connect, timeout, interrupted transfer) describe a
    // target that never answered in full.
    if err.is_builder() || err.is_decode() {
        TransportError::Failed(err.to_string())
    } else {
        TransportError::Unreachable(err.to_string())
    }
}

#[async_trait]
impl Transport for HttpsTransport {
    async fn exchange(
        &self,
        request: &TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let url = request.url();
        let builder = if request.head_only {
            self.client.head(&url)
        } else {
            self.client.get(&url)
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        Ok(TransportResponse { status, body })
    }
}
