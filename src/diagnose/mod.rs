use crate::ports::PortSpec;
use crate::probe::{probe, ProbeOutcome, ProbeTarget};
use crate::resolve::resolve_host;
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

pub mod classify;

pub use classify::*;

pub const DEFAULT_DNS_SERVERS: [&str; 2] = ["8.8.8.8", "1.1.1.1"];
pub const DEFAULT_LIVENESS_PORT: u16 = 443;
const DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Diagnosis {
    Stable,
    DnsOkPortsClosed,
    ConnectivitySuspect,
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Diagnosis::Stable => "stable",
            Diagnosis::DnsOkPortsClosed => "dns-ok-ports-closed",
            Diagnosis::ConnectivitySuspect => "connectivity-suspect",
        })
    }
}

/// Everything one diagnostic run learned, assembled once and handed to
/// the caller by value. The reporting layer renders it; the core never
/// writes files or the console.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticResult {
    pub target: String,
    pub resolved_ip: Option<IpAddr>,
    /// DNS-server reachability in configured order, not sorted.
    pub dns_servers: Vec<(String, bool)>,
    pub liveness_ok: bool,
    /// Port reachability in ascending port order.
    pub ports: Vec<(u16, bool)>,
    pub diagnosis: Diagnosis,
}

/// One bounded diagnostic pass against a target host.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    target: String,
    ports: PortSpec,
    timeout: Duration,
    dns_servers: Vec<String>,
    liveness_port: u16,
}

impl Diagnostic {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ports: PortSpec::empty(),
            timeout: Duration::from_secs(2),
            dns_servers: DEFAULT_DNS_SERVERS.iter().map(|s| s.to_string()).collect(),
            liveness_port: DEFAULT_LIVENESS_PORT,
        }
    }

    pub fn with_ports(mut self, ports: PortSpec) -> Self {
        self.ports = ports;
        self
    }

    /// Per-probe timeout. Every probe in the run is bounded by this
    /// individually.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the default public resolvers. A plain address probes
    /// TCP/53; an explicit `host:port` overrides the port.
    pub fn with_dns_servers(mut self, servers: Vec<String>) -> Self {
        self.dns_servers = servers;
        self
    }

    /// Port used for the TCP-connect liveness proxy (default 443).
    pub fn with_liveness_port(mut self, port: u16) -> Self {
        self.liveness_port = port;
        self
    }

    /// Runs the full diagnostic: DNS-server probes, host resolution,
    /// liveness probe and the port sweep, then classifies the combined
    /// outcomes. Probes run concurrently, but the result ordering is
    /// deterministic regardless of completion order.
    ///
    /// Infallible by design: every network failure is data in the
    /// result, and "everything is down" is itself a valid diagnosis.
    pub async fn run(&self) -> DiagnosticResult {
        debug!(
            "diagnostic run: target={} ports={:?} timeout={:?}",
            self.target,
            self.ports.ports(),
            self.timeout
        );

        let dns_handles: Vec<(String, JoinHandle<ProbeOutcome>)> = self
            .dns_servers
            .iter()
            .map(|server| {
                let (host, port) = split_server(server);
                let handle = tokio::spawn(probe(ProbeTarget::new(host, port, self.timeout)));
                (server.clone(), handle)
            })
            .collect();

        let liveness_handle = tokio::spawn(probe(ProbeTarget::new(
            self.target.clone(),
            self.liveness_port,
            self.timeout,
        )));

        let port_handles: Vec<(u16, JoinHandle<ProbeOutcome>)> = self
            .ports
            .ports()
            .iter()
            .map(|&port| {
                let handle = tokio::spawn(probe(ProbeTarget::new(
                    self.target.clone(),
                    port,
                    self.timeout,
                )));
                (port, handle)
            })
            .collect();

        // Independent of the probes above; port probes keep using the
        // hostname so this result is reported, never consumed.
        let resolved_ip = resolve_host(&self.target, self.timeout).await;

        let mut dns_servers = Vec::with_capacity(dns_handles.len());
        for (server, handle) in dns_handles {
            dns_servers.push((server, join_reachable(handle).await));
        }

        let liveness_ok = join_reachable(liveness_handle).await;

        let mut ports = Vec::with_capacity(port_handles.len());
        for (port, handle) in port_handles {
            ports.push((port, join_reachable(handle).await));
        }

        let diagnosis = classify(&dns_servers, liveness_ok, &ports);
        info!("diagnosis for {}: {}", self.target, diagnosis);

        DiagnosticResult {
            target: self.target.clone(),
            resolved_ip,
            dns_servers,
            liveness_ok,
            ports,
            diagnosis,
        }
    }

    /// Like [`run`](Self::run), but capped by an overall deadline.
    /// Whole result or nothing: on expiry, completed probe outcomes
    /// are discarded and `None` is returned.
    pub async fn run_with_deadline(&self, cap: Duration) -> Option<DiagnosticResult> {
        timeout(cap, self.run()).await.ok()
    }
}

async fn join_reachable(handle: JoinHandle<ProbeOutcome>) -> bool {
    handle.await.map(|outcome| outcome.reachable).unwrap_or(false)
}

fn split_server(server: &str) -> (String, u16) {
    // Bracketed IPv6 form, "[::1]" or "[::1]:5353".
    if let Some(rest) = server.strip_prefix('[') {
        if let Some((host, port)) = rest.split_once("]:") {
            if let Ok(port) = port.parse() {
                return (host.to_string(), port);
            }
        }
        if let Some(host) = rest.strip_suffix(']') {
            return (host.to_string(), DNS_PORT);
        }
    }
    if let Some((host, port)) = server.rsplit_once(':') {
        // A ':' left in the host part means an unbracketed IPv6
        // literal, not a port override.
        if !host.is_empty() && !host.contains(':') {
            if let Ok(port) = port.parse() {
                return (host.to_string(), port);
            }
        }
    }
    (server.to_string(), DNS_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_server_defaults_to_53() {
        assert_eq!(split_server("8.8.8.8"), ("8.8.8.8".to_string(), 53));
    }

    #[test]
    fn test_split_server_explicit_port() {
        assert_eq!(
            split_server("127.0.0.1:5353"),
            ("127.0.0.1".to_string(), 5353)
        );
    }

    #[test]
    fn test_split_server_ipv6_literal_is_not_an_override() {
        assert_eq!(split_server("::1"), ("::1".to_string(), 53));
        assert_eq!(
            split_server("2001:4860:4860::8888"),
            ("2001:4860:4860::8888".to_string(), 53)
        );
    }

    #[test]
    fn test_split_server_bracketed_ipv6() {
        assert_eq!(split_server("[::1]:5353"), ("::1".to_string(), 5353));
        assert_eq!(split_server("[::1]"), ("::1".to_string(), 53));
    }

    #[test]
    fn test_split_server_bad_port_falls_back() {
        assert_eq!(
            split_server("host:notaport"),
            ("host:notaport".to_string(), 53)
        );
    }
}
