use std::time::Instant;

use async_trait::async_trait;
use log::debug;
use tokio::net::TcpStream;

use crate::config::TcpConfig;
use crate::error::ScoutError;
use crate::scout::measure::{Measured, Measurement, field};
use crate::scout::Scout;

enum Outcome {
    Connected { elapsed_ms: f64 },
    Unreachable,
}

/// Checks that a TCP endpoint accepts connections and measures establishment
/// time.
///
/// Declares `connect_time`. The connection is closed as soon as it is
/// established; nothing is written to the peer.
pub struct TcpScout {
    config: TcpConfig,
    outcome: Option<Outcome>,
}

impl TcpScout {
    pub fn new(config: TcpConfig) -> Self {
        Self {
            config,
            outcome: None,
        }
    }

    /// Fully replace the configuration and reset prior measurements.
    pub fn configure(&mut self, config: TcpConfig) {
        self.config = config;
        self.outcome = None;
    }

    pub fn config(&self) -> &TcpConfig {
        &self.config
    }

    pub fn connect_time(&self) -> Option<f64> {
        match &self.outcome {
            Some(Outcome::Connected { elapsed_ms }) => Some(*elapsed_ms),
            _ => None,
        }
    }
}

impl Measured for TcpScout {
    fn target(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    fn bindable_fields(&self) -> &'static [&'static str] {
        &[field::CONNECT_TIME]
    }

    fn measurement(&self, name: &str) -> Option<Measurement> {
        if name != field::CONNECT_TIME {
            return None;
        }
        match &self.outcome {
            Some(Outcome::Connected { elapsed_ms }) => Some(Measurement::Float(*elapsed_ms)),
            _ => Some(Measurement::Unknown),
        }
    }
}

#[async_trait]
impl Scout for TcpScout {
    async fn execute(&mut self) -> Result<(), ScoutError> {
        self.outcome = None;

        if self.config.host.trim().is_empty() {
            return Err(ScoutError::Config("host is required".to_string()));
        }

        let address = self.target();
        let started = Instant::now();
        match TcpStream::connect(&address).await {
            Ok(stream) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                debug!("{address} accepted connection in {elapsed_ms:.2}ms");
                // Dropping the stream closes the connection; the check never
                // writes to the peer.
                drop(stream);
                self.outcome = Some(Outcome::Connected { elapsed_ms });
            }
            Err(e) => {
                debug!("{address} unreachable: {e}");
                self.outcome = Some(Outcome::Unreachable);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio::task;

    #[tokio::test]
    async fn test_connect_success_measures_time() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local address");

        let _handle = task::spawn(async move {
            while let Ok((_stream, _addr)) = listener.accept().await {
                // Accept and drop.
            }
        });

        let mut scout = TcpScout::new(TcpConfig {
            host: "127.0.0.1".to_string(),
            port: addr.port(),
        });

        scout.execute().await.expect("execute");
        let time = scout.connect_time().expect("connect time measured");
        assert!(time >= 0.0);
        assert_eq!(
            scout.measurement(field::CONNECT_TIME),
            Some(Measurement::Float(time))
        );
    }

    #[tokio::test]
    async fn test_refused_connection_becomes_unknown() {
        // Port 1 is essentially never listening.
        let mut scout = TcpScout::new(TcpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
        });

        scout.execute().await.expect("refusal is not an error");
        assert_eq!(scout.connect_time(), None);
        assert_eq!(
            scout.measurement(field::CONNECT_TIME),
            Some(Measurement::Unknown)
        );
    }

    #[tokio::test]
    async fn test_success_after_refusal_shows_no_residue() {
        let mut scout = TcpScout::new(TcpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
        });
        scout.execute().await.expect("execute");
        assert_eq!(scout.connect_time(), None);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("local address");
        let _handle = task::spawn(async move {
            while let Ok(_conn) = listener.accept().await {}
        });

        scout.configure(TcpConfig {
            host: "127.0.0.1".to_string(),
            port: addr.port(),
        });
        scout.execute().await.expect("execute");
        assert!(scout.connect_time().is_some());
    }

    #[tokio::test]
    async fn test_empty_host_is_a_configuration_error() {
        let mut scout = TcpScout::new(TcpConfig {
            host: "".to_string(),
            port: 443,
        });
        let err = scout.execute().await.expect_err("must propagate");
        assert!(matches!(err, ScoutError::Config(_)));
    }
}
