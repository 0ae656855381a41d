//! Active service resolution
//!
//! Finds the network service DNS changes should target. The default route's
//! interface is preferred; when that interface is a VPN tunnel (which
//! `networksetup` cannot configure) or does not map to a hardware port, the
//! first service holding an IPv4 address is used instead.
//!
//! # Architecture
//!
//! Functions here:
//! - Accept a [`NetworkSetup`] trait object (enabling mocking in tests)
//! - Degrade every query failure to "not found" rather than an error
//! - Leave parsing to [`super::parse`]
//!
//! # Example
//!
//! ```ignore
//! use dnsswitch::core::resolve_active_service;
//! use dnsswitch::platform::MacNetworkSetup;
//!
//! let setup = MacNetworkSetup::new();
//! if let Some(active) = resolve_active_service(&setup).await {
//!     println!("{} (vpn: {})", active.name, active.is_vpn);
//! }
//! ```

use super::parse::{
    parse_dns_servers, parse_hardware_port_for_device, parse_has_ipv4_address,
    parse_network_services, parse_route_interface,
};
use crate::constants::VIRTUAL_TUNNEL_PREFIXES;
use crate::models::{ActiveService, DnsServerList, NetworkInterface, ServiceName};
use crate::utils::CommandError;
use async_trait::async_trait;

/// Read-only system queries backing service resolution
///
/// Each method returns the raw stdout of the corresponding OS command. Implementations
/// live in `src/platform/`; tests use `core::mock::MockNetworkSetup`.
#[async_trait]
pub trait NetworkSetup: Send + Sync {
    /// `route -n get default`
    async fn default_route(&self) -> Result<String, CommandError>;

    /// `networksetup -listallhardwareports`
    async fn list_hardware_ports(&self) -> Result<String, CommandError>;

    /// `networksetup -listallnetworkservices`
    async fn list_network_services(&self) -> Result<String, CommandError>;

    /// `networksetup -getinfo <service>`
    async fn service_info(&self, service: &ServiceName) -> Result<String, CommandError>;

    /// `networksetup -getdnsservers <service>`
    async fn dns_servers(&self, service: &ServiceName) -> Result<String, CommandError>;
}

/// Interface carrying the default route, if any.
pub async fn resolve_primary_interface(setup: &dyn NetworkSetup) -> Option<NetworkInterface> {
    match setup.default_route().await {
        Ok(raw) => parse_route_interface(&raw).map(NetworkInterface::new),
        Err(error) => {
            tracing::debug!(%error, "Default route query failed");
            None
        }
    }
}

/// Classify an interface as a VPN-style tunnel by its name prefix.
///
/// Unknown prefixes are physical.
pub fn is_virtual_tunnel(iface: &NetworkInterface) -> bool {
    VIRTUAL_TUNNEL_PREFIXES
        .iter()
        .any(|prefix| iface.as_str().starts_with(prefix))
}

/// Hardware port (service) name for a physical interface.
pub async fn map_interface_to_service(
    setup: &dyn NetworkSetup,
    iface: &NetworkInterface,
) -> Option<ServiceName> {
    let raw = match setup.list_hardware_ports().await {
        Ok(raw) => raw,
        Err(error) => {
            tracing::debug!(%error, "Hardware port listing failed");
            return None;
        }
    };
    parse_hardware_port_for_device(&raw, iface.as_str())
        .map(ServiceName::new)
}

/// First enabled service, in listing order, that holds an IPv4 address.
pub async fn find_active_physical_service(setup: &dyn NetworkSetup) -> Option<ServiceName> {
    let raw = match setup.list_network_services().await {
        Ok(raw) => raw,
        Err(error) => {
            tracing::debug!(%error, "Network service listing failed");
            return None;
        }
    };

    for name in parse_network_services(&raw) {
        let service = ServiceName::new(name);
        match setup.service_info(&service).await {
            Ok(info) if parse_has_ipv4_address(&info) => return Some(service),
            Ok(_) => {}
            Err(error) => tracing::debug!(%error, %service, "Service info query failed"),
        }
    }
    None
}

/// Pick the service DNS changes should target.
///
/// 1. Primary interface is a tunnel: fall back to the first active physical service
///    and report `is_vpn = true`.
/// 2. Primary interface is physical: map it to its hardware port.
/// 3. Otherwise, or if the above found nothing: first active physical service with
///    `is_vpn = false`.
pub async fn resolve_active_service(setup: &dyn NetworkSetup) -> Option<ActiveService> {
    if let Some(iface) = resolve_primary_interface(setup).await {
        if is_virtual_tunnel(&iface) {
            if let Some(name) = find_active_physical_service(setup).await {
                tracing::debug!(
                    %iface,
                    service = %name,
                    "Default route is a tunnel; using physical service"
                );
                return Some(ActiveService { name, is_vpn: true });
            }
        } else if let Some(name) = map_interface_to_service(setup, &iface).await {
            tracing::debug!(%iface, service = %name, "Mapped primary interface");
            return Some(ActiveService {
                name,
                is_vpn: false,
            });
        }
        tracing::debug!(%iface, "Primary interface has no usable service");
    }

    let name = find_active_physical_service(setup).await?;
    tracing::debug!(service = %name, "Using first active service");
    Some(ActiveService {
        name,
        is_vpn: false,
    })
}

/// Current resolver list of a service; empty if the query fails.
pub async fn get_dns_servers(setup: &dyn NetworkSetup, service: &ServiceName) -> DnsServerList {
    match setup.dns_servers(service).await {
        Ok(raw) => DnsServerList::new(parse_dns_servers(&raw)),
        Err(error) => {
            tracing::debug!(%error, %service, "DNS server query failed");
            DnsServerList::default()
        }
    }
}
