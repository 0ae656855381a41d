//! dnsswitch - macOS DNS switcher
//!
//! Core library exposing platform-agnostic types and traits, plus the macOS
//! implementations the command-line front end wires together.

// Public modules
pub mod config;
pub mod constants;
pub mod core;
pub mod db;
pub mod logger;
pub mod models;
pub mod normalize;
pub mod platform;
pub mod utils;

// Re-export commonly used types
pub use core::{CredentialStore, DnsSwitcher, PrivilegedExecutor};
pub use models::{
    ActiveService, CredentialProfile, DnsChange, DnsServerList, SecureString, ServiceName,
};
pub use utils::{CommandError, CredentialError, DnsError, EscalationError, StoreError};
