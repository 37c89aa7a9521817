use serde::Deserialize;
use url::Url;

use crate::error::ScoutError;

/// Configuration for an HTTPS scout.
///
/// Constructed once and treated as immutable; replacing it on a live scout
/// goes through `HttpsScout::configure`, which resets prior measurements.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// The host that will be connected to.
    pub host: String,

    /// The port that will be connected to. Defaults to 443.
    #[serde(default = "default_port")]
    pub port: u16,

    /// The path that will be fetched from the host. Defaults to "/".
    #[serde(default = "default_path")]
    pub path: String,

    /// When true, issue a metadata-only HEAD request instead of a full GET.
    #[serde(default)]
    pub head_only: bool,

    /// Accept any certificate the target presents, including self-signed and
    /// expired ones. Defaults to true: the scout checks availability, not
    /// transport authenticity, and internal endpoints rarely carry publicly
    /// trusted chains. This weakens man-in-the-middle resistance for the
    /// monitoring traffic itself; set it to false for targets where the chain
    /// must also be valid.
    #[serde(default = "default_trust_all")]
    pub trust_all_certificates: bool,
}

fn default_port() -> u16 {
    443
}

fn default_path() -> String {
    "/".to_string()
}

fn default_trust_all() -> bool {
    true
}

impl HttpConfig {
    /// Build a configuration for a host, with default port, path and trust
    /// settings.
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            path: default_path(),
            head_only: false,
            trust_all_certificates: default_trust_all(),
        }
    }

    /// Parse an `https://` URL into a configuration.
    pub fn from_url(target: &str) -> Result<Self, ScoutError> {
        let url = Url::parse(target)
            .map_err(|e| ScoutError::Config(format!("invalid target url {target}: {e}")))?;

        if url.scheme() != "https" {
            return Err(ScoutError::Config(format!(
                "unsupported scheme {} for {target}, only https targets are probed",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .ok_or_else(|| ScoutError::Config(format!("target url {target} has no host")))?
            .to_string();

        Ok(Self {
            host,
            port: url.port().unwrap_or_else(default_port),
            path: url.path().to_string(),
            head_only: false,
            trust_all_certificates: default_trust_all(),
        })
    }
}
