use crate::utils::{format_duration, measure_time};
use log::debug;
use serde::Serialize;
use std::io;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

/// One bounded TCP-connect attempt against `host:port`.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeTarget {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl ProbeTarget {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    None,
    Timeout,
    Refused,
    ResolutionFailed,
    Other,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub target: ProbeTarget,
    pub reachable: bool,
    pub elapsed: Duration,
    pub failure: FailureKind,
}

/// Attempts one TCP connection, bounded by `target.timeout`.
///
/// Never fails: every resolution or connect error is folded into the
/// outcome's `failure` field. `elapsed` is wall-clock time for the
/// whole attempt and is informational only.
pub async fn probe(target: ProbeTarget) -> ProbeOutcome {
    let (elapsed, failure) = measure_time(|| async {
        match timeout(target.timeout, attempt(&target.host, target.port)).await {
            Ok(kind) => kind,
            Err(_) => FailureKind::Timeout,
        }
    })
    .await;

    let reachable = failure == FailureKind::None;
    debug!(
        "probe {}:{} -> reachable={} failure={:?} elapsed={}",
        target.host,
        target.port,
        reachable,
        failure,
        format_duration(elapsed)
    );

    ProbeOutcome {
        target,
        reachable,
        elapsed,
        failure,
    }
}

async fn attempt(host: &str, port: u16) -> FailureKind {
    // Per-connection resolution, so a probe against a hostname surfaces
    // its own resolution failure independently of the Resolver module.
    let mut addrs = match lookup_host((host, port)).await {
        Ok(addrs) => addrs,
        Err(_) => return FailureKind::ResolutionFailed,
    };
    let addr = match addrs.next() {
        Some(addr) => addr,
        None => return FailureKind::ResolutionFailed,
    };

    match TcpStream::connect(addr).await {
        Ok(_stream) => FailureKind::None,
        Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => FailureKind::Refused,
        Err(_) => FailureKind::Other,
    }
}
