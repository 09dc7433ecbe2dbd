use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSpec {
    #[error("unparseable port token '{0}'")]
    BadToken(String),
    #[error("port {0} outside the valid range 1-65535")]
    OutOfRange(u64),
}

/// Deduplicated, ascending set of target ports parsed from a textual
/// spec such as `"443"`, `"80,443"` or `"20-25,8080"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortSpec(Vec<u16>);

impl PortSpec {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parses a comma-separated list of port numbers and `low-high`
    /// ranges. Range bounds are order-insensitive (`"25-20"` means
    /// `20-25`) and empty tokens from stray commas are ignored.
    pub fn parse(spec: &str) -> Result<Self, InvalidSpec> {
        let mut ports = BTreeSet::new();
        for token in spec.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.split_once('-') {
                Some((a, b)) => {
                    let a = parse_port(a.trim())?;
                    let b = parse_port(b.trim())?;
                    let (low, high) = if a <= b { (a, b) } else { (b, a) };
                    ports.extend(low..=high);
                }
                None => {
                    ports.insert(parse_port(token)?);
                }
            }
        }
        Ok(Self(ports.into_iter().collect()))
    }

    pub fn ports(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_port(token: &str) -> Result<u16, InvalidSpec> {
    let value: u64 = token
        .parse()
        .map_err(|_| InvalidSpec::BadToken(token.to_string()))?;
    if value == 0 || value > u64::from(u16::MAX) {
        return Err(InvalidSpec::OutOfRange(value));
    }
    Ok(value as u16)
}
