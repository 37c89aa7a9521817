use serde::Deserialize;

/// Configuration for a TCP connection scout.
#[derive(Debug, Clone, Deserialize)]
pub struct TcpConfig {
    /// The host that will be connected to.
    pub host: String,

    /// The port that will be connected to.
    pub port: u16,
}

/// Configuration for a DNS resolution scout.
///
/// With no explicit nameservers the system resolver configuration is used.
/// Explicit nameservers are queried over TCP with bounded attempts and
/// timeout, so a dead nameserver fails the check quickly instead of hanging
/// the polling cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsConfig {
    /// The name to resolve.
    pub host: String,

    /// Nameserver IPs to query, e.g. `["1.1.1.1", "8.8.8.8"]`. Empty means
    /// system configuration.
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// Lookup attempts per nameserver. Defaults to 2.
    #[serde(default = "default_attempts")]
    pub attempts: usize,

    /// Per-request timeout in milliseconds. Defaults to 100.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_attempts() -> usize {
    2
}

fn default_timeout_ms() -> u64 {
    100
}

/// Configuration for a TLS certificate scout.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsCertConfig {
    /// The host whose certificate will be inspected.
    pub host: String,

    /// The port that will be connected to. Defaults to 443.
    #[serde(default = "default_tls_port")]
    pub port: u16,
}

fn default_tls_port() -> u16 {
    443
}
