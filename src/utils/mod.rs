//! # Utilities Module
//!
//! Cross-cutting concerns shared by `core` and `platform`.
//!
//! ## Modules
//!
//! - [`errors`]: Typed error hierarchy using `thiserror` for domain-specific errors
//!
//! ## Design Notes
//!
//! Error types are defined in this module to avoid circular dependencies between
//! the `core` and `platform` modules. [`DnsError`] is the only type that crosses
//! the library boundary to the CLI; everything else is folded into it by the
//! orchestrator or degraded to "not found" by the resolver.

pub mod errors;

pub use errors::{
    CommandError, ConfigError, CredentialError, DnsError, EscalationError, StoreError,
};
