//! Network model types: interfaces, services, and resolver lists

use crate::constants::{AUTOMATIC_DNS_TOKEN, NO_DNS_SENTINEL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// OS-level interface token such as `en0` or `utun3`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NetworkInterface(String);

impl NetworkInterface {
    pub fn new(name: impl Into<String>) -> Self {
        NetworkInterface(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-facing network service name such as `Wi-Fi`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: impl Into<String>) -> Self {
        ServiceName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Service chosen as the DNS target, and whether a VPN owned the default route
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveService {
    pub name: ServiceName,
    pub is_vpn: bool,
}

/// Ordered resolver list as reported by or applied to a service
///
/// An empty list, the single "no servers set" sentence, and the single
/// [`AUTOMATIC_DNS_TOKEN`] all mean automatic DNS.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DnsServerList(Vec<String>);

impl DnsServerList {
    pub fn new(servers: Vec<String>) -> Self {
        DnsServerList(servers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when this list represents "no explicit resolvers configured"
    pub fn is_automatic(&self) -> bool {
        match self.0.as_slice() {
            [] => true,
            [only] => only.contains(NO_DNS_SENTINEL) || only == AUTOMATIC_DNS_TOKEN,
            _ => false,
        }
    }

    /// Subset test: every expected address appears somewhere in this list
    pub fn contains_all(&self, expected: &[String]) -> bool {
        expected.iter().all(|addr| self.0.contains(addr))
    }

    /// List to apply when restoring this saved state
    ///
    /// Empty or sentinel state collapses to the automatic token. Anything else,
    /// including a list that starts with the automatic token, is kept verbatim.
    pub fn restore_target(&self) -> DnsServerList {
        if self.0.is_empty() || (self.0.len() == 1 && self.0[0].contains(NO_DNS_SENTINEL)) {
            return DnsServerList(vec![AUTOMATIC_DNS_TOKEN.to_string()]);
        }
        self.clone()
    }

    /// Individual `-setdnsservers` arguments; automatic collapses to one token
    pub fn wire_tokens(&self) -> Vec<&str> {
        if self.is_automatic() {
            vec![AUTOMATIC_DNS_TOKEN]
        } else {
            self.0.iter().map(String::as_str).collect()
        }
    }
}

impl From<Vec<String>> for DnsServerList {
    fn from(servers: Vec<String>) -> Self {
        DnsServerList(servers)
    }
}

impl From<&[&str]> for DnsServerList {
    fn from(servers: &[&str]) -> Self {
        DnsServerList(servers.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for DnsServerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_automatic() {
            write!(f, "(automatic)")
        } else {
            write!(f, "{}", self.0.join(", "))
        }
    }
}

/// Outcome of a connect or disconnect: the service changed and the list applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnsChange {
    pub service: ServiceName,
    pub servers: DnsServerList,
}
