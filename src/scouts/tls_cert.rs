use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use tokio::net::TcpStream;
use tokio_native_tls::TlsConnector as TokioTlsConnector;
use x509_parser::parse_x509_certificate;

use crate::config::TlsCertConfig;
use crate::error::ScoutError;
use crate::scout::measure::{Measured, Measurement, field};
use crate::scout::Scout;

const SECONDS_PER_DAY: i64 = 86_400;

enum Outcome {
    Inspected {
        handshake_ms: f64,
        expiry_days: i64,
    },
    Unreachable,
}

/// Completes a TLS handshake and inspects the peer certificate.
///
/// Declares `handshake_time` and `cert_expiry_days` (negative once the
/// certificate has expired). Invalid and self-signed chains are accepted on
/// purpose: expiring internal certificates are exactly what this scout
/// exists to surface, so a failed validation must not hide the certificate
/// from inspection.
pub struct TlsCertScout {
    config: TlsCertConfig,
    connector: TokioTlsConnector,
    outcome: Option<Outcome>,
}

impl TlsCertScout {
    pub fn new(config: TlsCertConfig) -> Result<Self, ScoutError> {
        let mut builder = native_tls::TlsConnector::builder();
        builder.danger_accept_invalid_certs(true);
        let connector = builder
            .build()
            .map_err(|e| ScoutError::Transport(format!("failed to build tls connector: {e}")))?;

        Ok(Self {
            config,
            connector: TokioTlsConnector::from(connector),
            outcome: None,
        })
    }

    /// Fully replace the configuration and reset prior measurements.
    pub fn configure(&mut self, config: TlsCertConfig) {
        self.config = config;
        self.outcome = None;
    }

    pub fn config(&self) -> &TlsCertConfig {
        &self.config
    }

    pub fn handshake_time(&self) -> Option<f64> {
        match &self.outcome {
            Some(Outcome::Inspected { handshake_ms, .. }) => Some(*handshake_ms),
            _ => None,
        }
    }

    pub fn cert_expiry_days(&self) -> Option<i64> {
        match &self.outcome {
            Some(Outcome::Inspected { expiry_days, .. }) => Some(*expiry_days),
            _ => None,
        }
    }
}

impl Measured for TlsCertScout {
    fn target(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    fn bindable_fields(&self) -> &'static [&'static str] {
        &[field::HANDSHAKE_TIME, field::CERT_EXPIRY_DAYS]
    }

    fn measurement(&self, name: &str) -> Option<Measurement> {
        if !self.bindable_fields().contains(&name) {
            return None;
        }
        let Some(Outcome::Inspected {
            handshake_ms,
            expiry_days,
        }) = &self.outcome
        else {
            return Some(Measurement::Unknown);
        };
        match name {
            field::HANDSHAKE_TIME => Some(Measurement::Float(*handshake_ms)),
            field::CERT_EXPIRY_DAYS => Some(Measurement::Integer(*expiry_days)),
            _ => None,
        }
    }
}

#[async_trait]
impl Scout for TlsCertScout {
    async fn execute(&mut self) -> Result<(), ScoutError> {
        self.outcome = None;

        if self.config.host.trim().is_empty() {
            return Err(ScoutError::Config("host is required".to_string()));
        }

        let address = self.target();
        let started = Instant::now();

        let stream = match TcpStream::connect(&address).await {
            Ok(stream) => stream,
            Err(e) => {
                debug!("{address} unreachable: {e}");
                self.outcome = Some(Outcome::Unreachable);
                return Ok(());
            }
        };

        let tls_stream = match self.connector.connect(&self.config.host, stream).await {
            Ok(tls_stream) => tls_stream,
            Err(e) => {
                debug!("{address} handshake failed: {e}");
                self.outcome = Some(Outcome::Unreachable);
                return Ok(());
            }
        };
        let handshake_ms = started.elapsed().as_secs_f64() * 1000.0;

        // A peer that completed the handshake but yields no parseable
        // certificate is defective, not unreachable; that propagates.
        let certificate = tls_stream
            .get_ref()
            .peer_certificate()
            .map_err(|e| ScoutError::Certificate(format!("could not read peer certificate: {e}")))?
            .ok_or_else(|| ScoutError::Certificate("peer presented no certificate".to_string()))?;
        let der = certificate
            .to_der()
            .map_err(|e| ScoutError::Certificate(format!("could not encode certificate: {e}")))?;
        let (_, parsed) = parse_x509_certificate(&der)
            .map_err(|e| ScoutError::Certificate(format!("unparseable certificate: {e}")))?;

        let not_after = parsed.validity().not_after.timestamp();
        let expiry_days = (not_after - Utc::now().timestamp()) / SECONDS_PER_DAY;
        debug!("{address} certificate expires in {expiry_days} days");

        self.outcome = Some(Outcome::Inspected {
            handshake_ms,
            expiry_days,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refused_connection_becomes_unknown() {
        let mut scout = TlsCertScout::new(TlsCertConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
        })
        .expect("scout builds");

        scout.execute().await.expect("refusal is not an error");

        assert_eq!(scout.handshake_time(), None);
        assert_eq!(scout.cert_expiry_days(), None);
        for name in scout.bindable_fields() {
            assert_eq!(scout.measurement(name), Some(Measurement::Unknown));
        }
    }

    #[tokio::test]
    async fn test_plaintext_peer_fails_handshake_into_unknown() {
        use tokio::io::AsyncWriteExt;
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("local address");

        // A peer that answers with plaintext instead of a TLS handshake.
        let _handle = tokio::task::spawn(async move {
            while let Ok((mut stream, _addr)) = listener.accept().await {
                let _ = stream.write_all(b"not tls\n").await;
            }
        });

        let mut scout = TlsCertScout::new(TlsCertConfig {
            host: "127.0.0.1".to_string(),
            port: addr.port(),
        })
        .expect("scout builds");

        scout.execute().await.expect("handshake failure is not an error");
        assert_eq!(
            scout.measurement(field::CERT_EXPIRY_DAYS),
            Some(Measurement::Unknown)
        );
    }

    #[tokio::test]
    async fn test_empty_host_is_a_configuration_error() {
        let mut scout = TlsCertScout::new(TlsCertConfig {
            host: "".to_string(),
            port: 443,
        })
        .expect("scout builds");

        let err = scout.execute().await.expect_err("must propagate");
        assert!(matches!(err, ScoutError::Config(_)));
    }

    #[test]
    fn test_reconfigure_resets_measurements() {
        let mut scout = TlsCertScout::new(TlsCertConfig {
            host: "example.test".to_string(),
            port: 443,
        })
        .expect("scout builds");

        scout.configure(TlsCertConfig {
            host: "other.test".to_string(),
            port: 8443,
        });
        assert_eq!(scout.config().host, "other.test");
        assert_eq!(
            scout.measurement(field::HANDSHAKE_TIME),
            Some(Measurement::Unknown)
        );
    }
}
