//! # Domain Models
//!
//! Core data structures for network services, resolver lists, and secrets.
//!
//! ## Security Design
//!
//! The [`SecureString`] type provides memory-safe credential handling:
//! - Password data is zeroed on drop to prevent leakage via swap/core dumps
//! - Never exposed in `Debug` or `Display` implementations
//!
//! The administrator password is cached in the macOS keychain under a single
//! [`CredentialProfile`], never in plaintext files or logs.
//!
//! ## Automatic DNS
//!
//! [`DnsServerList`] owns the rules for the three spellings of "no explicit
//! resolvers" and collapses them to one wire token when applied.

pub mod credentials;
pub mod network;

pub use credentials::{CredentialProfile, SecureString};
pub use network::{ActiveService, DnsChange, DnsServerList, NetworkInterface, ServiceName};
