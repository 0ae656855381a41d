//! Core business logic (platform-agnostic)
//!
//! CRITICAL: This module MUST NOT spawn processes or touch OS stores directly.
//! Every side effect goes through a trait implemented in `crate::platform`.

pub mod credential;
pub mod executor;
pub mod network;
pub mod parse;
pub mod prompt;
pub mod state;
pub mod switcher;

// Test doubles for the traits above (tests only)
#[cfg(test)]
pub mod mock;

pub use credential::CredentialStore;
pub use executor::{PrivilegeEscalator, PrivilegedExecutor};
pub use network::{
    find_active_physical_service, get_dns_servers, is_virtual_tunnel, map_interface_to_service,
    resolve_active_service, resolve_primary_interface, NetworkSetup,
};
pub use prompt::CredentialProvider;
pub use state::DnsStateStore;
pub use switcher::{build_set_dns_command, DnsSwitcher};
