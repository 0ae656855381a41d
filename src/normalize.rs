//! Input normalisation helpers for resolver addresses.
//!
//! Every user-supplied server list passes through [`normalize_dns_servers`]
//! before it reaches the status check or the privileged shell command,
//! ensuring a single canonical representation (trimmed, validated,
//! deduplicated) across the application.

use crate::utils::DnsError;
use std::collections::HashSet;
use std::net::IpAddr;

/// Normalise a single resolver address: trim whitespace and require an IP literal.
pub fn normalize_dns_server(raw: &str) -> Result<String, DnsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DnsError::InvalidArgs("DNS server address cannot be empty".to_string()));
    }

    trimmed
        .parse::<IpAddr>()
        .map(|addr| addr.to_string())
        .map_err(|_| DnsError::InvalidArgs(format!("'{trimmed}' is not an IPv4 or IPv6 address")))
}

/// Normalise an iterator of resolver addresses into an ordered, deduplicated list.
///
/// Blank entries are skipped. An empty result is rejected.
pub fn normalize_dns_servers<I, S>(servers: I) -> Result<Vec<String>, DnsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    for raw in servers {
        if raw.as_ref().trim().is_empty() {
            continue;
        }
        let normalized = normalize_dns_server(raw.as_ref())?;
        if seen.insert(normalized.clone()) {
            cleaned.push(normalized);
        }
    }

    if cleaned.is_empty() {
        return Err(DnsError::InvalidArgs(
            "At least one DNS server is required".to_string(),
        ));
    }
    Ok(cleaned)
}
