use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use log::{debug, warn};

use crate::config::HttpConfig;
use crate::error::ScoutError;
use crate::scout::measure::{Measured, Measurement, field};
use crate::scout::Scout;
use crate::transport::{HttpsTransport, Transport, TransportError, TransportRequest};

enum Outcome {
    Responsive {
        code: u16,
        body: String,
        elapsed_ms: f64,
    },
    Unreachable,
}

/// Checks an HTTPS endpoint and measures status code, body and round trip
/// time.
///
/// Declares `response_code`, `response_body` and `response_time`. The three
/// are written as one unit: after every execution either all of them hold
/// measured values, or all of them are the unknown sentinel.
pub struct HttpsScout {
    config: HttpConfig,
    transport: Arc<dyn Transport>,
    outcome: Option<Outcome>,
}

impl HttpsScout {
    /// Build a scout over the default reqwest transport, honoring
    /// `config.trust_all_certificates`.
    pub fn new(config: HttpConfig) -> Result<Self, ScoutError> {
        let transport = HttpsTransport::new(config.trust_all_certificates)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build a scout over an injected transport. The transport owns its own
    /// trust and deadline settings; `config.trust_all_certificates` is not
    /// consulted.
    pub fn with_transport(config: HttpConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            outcome: None,
        }
    }

    /// Fully replace the configuration, rebuilding the default transport from
    /// it. No merging with the previous configuration takes place, and prior
    /// measurements are reset to the unknown sentinel.
    pub fn configure(&mut self, config: HttpConfig) -> Result<(), ScoutError> {
        self.transport = Arc::new(HttpsTransport::new(config.trust_all_certificates)?);
        self.config = config;
        self.outcome = None;
        Ok(())
    }

    /// Like [`configure`](Self::configure), with an injected transport.
    pub fn configure_with_transport(&mut self, config: HttpConfig, transport: Arc<dyn Transport>) {
        self.config = config;
        self.transport = transport;
        self.outcome = None;
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub fn response_code(&self) -> Option<u16> {
        match &self.outcome {
            Some(Outcome::Responsive { code, .. }) => Some(*code),
            _ => None,
        }
    }

    pub fn response_body(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Responsive { body, .. }) => Some(body),
            _ => None,
        }
    }

    pub fn response_time(&self) -> Option<f64> {
        match &self.outcome {
            Some(Outcome::Responsive { elapsed_ms, .. }) => Some(*elapsed_ms),
            _ => None,
        }
    }
}

impl Measured for HttpsScout {
    fn target(&self) -> String {
        format!(
            "{}:{}{}",
            self.config.host, self.config.port, self.config.path
        )
    }

    fn bindable_fields(&self) -> &'static [&'static str] {
        &[
            field::RESPONSE_CODE,
            field::RESPONSE_BODY,
            field::RESPONSE_TIME,
        ]
    }

    fn measurement(&self, name: &str) -> Option<Measurement> {
        if !self.bindable_fields().contains(&name) {
            return None;
        }

        let Some(Outcome::Responsive {
            code,
            body,
            elapsed_ms,
        }) = &self.outcome
        else {
            return Some(Measurement::Unknown);
        };

        match name {
            field::RESPONSE_CODE => Some(Measurement::Integer(i64::from(*code))),
            field::RESPONSE_BODY => Some(Measurement::Text(body.clone())),
            field::RESPONSE_TIME => Some(Measurement::Float(*elapsed_ms)),
            _ => None,
        }
    }
}

#[async_trait]
impl Scout for HttpsScout {
    async fn execute(&mut self) -> Result<(), ScoutError> {
        // Reset first: whatever happens below, values from a previous attempt
        // must never be observable after this call returns.
        self.outcome = None;

        if self.config.host.trim().is_empty() {
            return Err(ScoutError::Config("host is required".to_string()));
        }

        let request = TransportRequest {
            host: self.config.host.clone(),
            port: self.config.port,
            path: self.config.path.clone(),
            head_only: self.config.head_only,
        };

        let started = Instant::now();
        match self.transport.exchange(&request).await {
            Ok(response) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                debug!(
                    "{} answered {} in {:.2}ms",
                    self.target(),
                    response.status,
                    elapsed_ms
                );
                self.outcome = Some(Outcome::Responsive {
                    code: response.status,
                    body: response.body,
                    elapsed_ms,
                });
                Ok(())
            }
            Err(TransportError::Unreachable(reason)) => {
                debug!("{} unreachable: {reason}", self.target());
                self.outcome = Some(Outcome::Unreachable);
                Ok(())
            }
            Err(TransportError::Failed(reason)) => {
                warn!("exchange with {} failed: {reason}", self.target());
                self.outcome = Some(Outcome::Unreachable);
                Err(ScoutError::Transport(reason))
            }
        }
    }
}
