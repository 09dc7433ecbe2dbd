use super::Diagnosis;

/// Maps the combined probe outcomes to a diagnosis. Pure, total and
/// deterministic; first matching rule wins:
///
/// 1. liveness ok and at least one port reachable -> `Stable`
/// 2. else at least one DNS server reachable -> `DnsOkPortsClosed`
/// 3. else -> `ConnectivitySuspect`
///
/// With zero requested ports rule 1 can never fire, so the decision
/// falls through to the DNS and liveness evidence alone.
pub fn classify(
    dns_servers: &[(String, bool)],
    liveness_ok: bool,
    ports: &[(u16, bool)],
) -> Diagnosis {
    let any_port_open = ports.iter().any(|(_, ok)| *ok);
    let any_dns_reachable = dns_servers.iter().any(|(_, ok)| *ok);

    if liveness_ok && any_port_open {
        Diagnosis::Stable
    } else if any_dns_reachable {
        Diagnosis::DnsOkPortsClosed
    } else {
        Diagnosis::ConnectivitySuspect
    }
}
