//! Parsers for `route` and `networksetup` text output
//!
//! Each function takes the raw stdout of one command and never fails: malformed
//! or empty input yields `None` / an empty list, which the resolver treats the
//! same as "not found".

use crate::constants::{
    DEVICE_PREFIX, DISABLED_SERVICE_MARKER, HARDWARE_PORT_PREFIX, IPV4_ADDRESS_PREFIX,
    NULL_ADDRESS, ROUTE_INTERFACE_PREFIX, SERVICES_HEADER_MARKER, SERVICES_NOTE_MARKER,
};

/// Extract the interface of the default route from `route -n get default`.
///
/// The first trimmed line starting with `interface: ` wins.
pub fn parse_route_interface(raw: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(ROUTE_INTERFACE_PREFIX))
        .map(str::trim)
        .filter(|iface| !iface.is_empty())
        .map(str::to_string)
}

/// Find the hardware port whose `Device:` line equals `device` exactly.
///
/// Output comes in blocks:
///
/// ```text
/// Hardware Port: Wi-Fi
/// Device: en0
/// Ethernet Address: ...
/// ```
///
/// The most recent `Hardware Port:` line above a matching `Device:` line names the
/// port. Listing order is preserved, so the first match wins.
pub fn parse_hardware_port_for_device(raw: &str, device: &str) -> Option<String> {
    let mut current_port: Option<&str> = None;
    for line in raw.lines().map(str::trim) {
        if let Some(port) = line.strip_prefix(HARDWARE_PORT_PREFIX) {
            current_port = Some(port.trim());
        } else if let Some(dev) = line.strip_prefix(DEVICE_PREFIX) {
            if dev.trim() == device {
                if let Some(port) = current_port.filter(|p| !p.is_empty()) {
                    return Some(port.to_string());
                }
            }
            // A device line closes its block
            current_port = None;
        } else if line.is_empty() {
            current_port = None;
        }
    }
    None
}

/// Parse `networksetup -listallnetworkservices` into service names.
///
/// Drops the explanatory header, footnotes, blank lines, and disabled services
/// (listed with a leading `*`).
pub fn parse_network_services(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.contains(SERVICES_HEADER_MARKER))
        .filter(|line| !line.contains(SERVICES_NOTE_MARKER))
        .filter(|line| !line.starts_with(DISABLED_SERVICE_MARKER))
        .map(str::to_string)
        .collect()
}

/// True when `networksetup -getinfo <service>` reports a non-null IPv4 address.
pub fn parse_has_ipv4_address(raw: &str) -> bool {
    raw.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(IPV4_ADDRESS_PREFIX))
        .map(str::trim)
        .any(|value| !value.is_empty() && value != NULL_ADDRESS && value != "none")
}

/// Parse `networksetup -getdnsservers <service>` into trimmed, non-empty lines.
///
/// The "There aren't any DNS Servers set on ..." sentence is returned as a single
/// element; callers distinguish it via [`crate::models::DnsServerList::is_automatic`].
pub fn parse_dns_servers(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
