use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::{system_conf, TokioAsyncResolver};
use log::debug;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::timeout;

/// Forward DNS lookup, bounded by `cap`.
///
/// Resolution failure is routine input here, not an error: NXDOMAIN,
/// resolver timeouts and malformed names all come back as `None`.
/// Literal IP addresses short-circuit without touching the resolver.
pub async fn resolve_host(host: &str, cap: Duration) -> Option<IpAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Some(ip);
    }

    let (config, opts) = system_conf::read_system_conf()
        .unwrap_or_else(|_| (ResolverConfig::default(), ResolverOpts::default()));
    let resolver = TokioAsyncResolver::tokio(config, opts);

    let lookup = match timeout(cap, resolver.lookup_ip(host)).await {
        Ok(Ok(lookup)) => lookup,
        Ok(Err(e)) => {
            debug!("resolution of {host} failed: {e}");
            return None;
        }
        Err(_) => {
            debug!("resolution of {host} timed out after {cap:?}");
            return None;
        }
    };

    lookup.iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_literal_ipv4_short_circuits() {
        let ip = resolve_host("192.0.2.1", Duration::from_secs(1)).await;
        assert_eq!(ip, Some("192.0.2.1".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_literal_ipv6_short_circuits() {
        let ip = resolve_host("::1", Duration::from_secs(1)).await;
        assert_eq!(ip, Some("::1".parse().unwrap()));
    }

    #[tokio::test]
    async fn test_unresolvable_name_is_none() {
        let ip = resolve_host("nonexistent.invalid", Duration::from_secs(2)).await;
        assert_eq!(ip, None);
    }
}
