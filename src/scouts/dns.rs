use std::net::IpAddr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts},
};

use crate::config::DnsConfig;
use crate::error::ScoutError;
use crate::scout::measure::{Measured, Measurement, field};
use crate::scout::Scout;

enum Outcome {
    Resolved {
        elapsed_ms: f64,
        address_count: i64,
    },
    Unresolved,
}

/// Checks that a name resolves and measures lookup time and answer size.
///
/// Declares `resolve_time` and `address_count`. Resolution goes through the
/// system configuration, or through explicitly configured nameservers queried
/// over TCP.
pub struct DnsScout {
    config: DnsConfig,
    resolver: TokioAsyncResolver,
    outcome: Option<Outcome>,
}

impl DnsScout {
    pub fn new(config: DnsConfig) -> Result<Self, ScoutError> {
        let resolver = build_resolver(&config)?;
        Ok(Self {
            config,
            resolver,
            outcome: None,
        })
    }

    /// Fully replace the configuration, rebuilding the resolver from it, and
    /// reset prior measurements.
    pub fn configure(&mut self, config: DnsConfig) -> Result<(), ScoutError> {
        self.resolver = build_resolver(&config)?;
        self.config = config;
        self.outcome = None;
        Ok(())
    }

    pub fn config(&self) -> &DnsConfig {
        &self.config
    }

    pub fn resolve_time(&self) -> Option<f64> {
        match &self.outcome {
            Some(Outcome::Resolved { elapsed_ms, .. }) => Some(*elapsed_ms),
            _ => None,
        }
    }

    pub fn address_count(&self) -> Option<i64> {
        match &self.outcome {
            Some(Outcome::Resolved { address_count, .. }) => Some(*address_count),
            _ => None,
        }
    }
}

fn build_resolver(config: &DnsConfig) -> Result<TokioAsyncResolver, ScoutError> {
    if config.nameservers.is_empty() {
        return TokioAsyncResolver::tokio_from_system_conf().map_err(|e| {
            ScoutError::Config(format!("system resolver configuration unavailable: {e}"))
        });
    }

    let mut opts = ResolverOpts::default();
    opts.attempts = config.attempts;
    opts.timeout = Duration::from_millis(config.timeout_ms);
    // No cache: every execution must measure a real lookup, not a hit on a
    // previous one.
    opts.cache_size = 0;

    let mut name_servers = NameServerConfigGroup::new();
    for host in &config.nameservers {
        let ip: IpAddr = host
            .parse()
            .map_err(|e| ScoutError::Config(format!("invalid nameserver {host}: {e}")))?;
        name_servers.push(NameServerConfig {
            socket_addr: (ip, 53).into(),
            protocol: Protocol::Tcp, // TCP is more reliable than UDP for DNS queries
            tls_dns_name: None,
            trust_negative_responses: false,
            bind_addr: None,
        });
    }

    let resolver_config = ResolverConfig::from_parts(None, vec![], name_servers);
    Ok(TokioAsyncResolver::tokio(resolver_config, opts))
}

impl Measured for DnsScout {
    fn target(&self) -> String {
        self.config.host.clone()
    }

    fn bindable_fields(&self) -> &'static [&'static str] {
        &[field::RESOLVE_TIME, field::ADDRESS_COUNT]
    }

    fn measurement(&self, name: &str) -> Option<Measurement> {
        if !self.bindable_fields().contains(&name) {
            return None;
        }
        let Some(Outcome::Resolved {
            elapsed_ms,
            address_count,
        }) = &self.outcome
        else {
            return Some(Measurement::Unknown);
        };
        match name {
            field::RESOLVE_TIME => Some(Measurement::Float(*elapsed_ms)),
            field::ADDRESS_COUNT => Some(Measurement::Integer(*address_count)),
            _ => None,
        }
    }
}

#[async_trait]
impl Scout for DnsScout {
    async fn execute(&mut self) -> Result<(), ScoutError> {
        self.outcome = None;

        if self.config.host.trim().is_empty() {
            return Err(ScoutError::Config("host is required".to_string()));
        }

        let started = Instant::now();
        match self.resolver.lookup_ip(self.config.host.as_str()).await {
            Ok(lookup) => {
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                let address_count = lookup.iter().count() as i64;
                debug!(
                    "{} resolved to {address_count} addresses in {elapsed_ms:.2}ms",
                    self.config.host
                );
                self.outcome = Some(Outcome::Resolved {
                    elapsed_ms,
                    address_count,
                });
            }
            Err(e) => {
                debug!("{} did not resolve: {e}", self.config.host);
                self.outcome = Some(Outcome::Unresolved);
            }
        }

        Ok(())
    }
}
