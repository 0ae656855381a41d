//! macOS Keychain implementation
//!
//! Backed by the `keyring` crate, which talks to the login keychain on macOS.
//! Each profile maps to one generic password item keyed by service and account.

use crate::core::CredentialStore;
use crate::models::{CredentialProfile, SecureString};
use crate::utils::CredentialError;
use async_trait::async_trait;

/// Keychain-backed credential store
///
/// # Security
/// - Secrets are encrypted at rest by the OS
/// - Items are scoped to the current user's login keychain
/// - Secrets are never logged or included in errors
///
/// Keychain calls block and run inline on the calling task. The CLI drives
/// everything from a current-thread runtime, so there is no worker to starve.
pub struct KeychainCredentialStore;

impl KeychainCredentialStore {
    pub fn new() -> Self {
        KeychainCredentialStore
    }

    /// Returns an Entry into the OS credential vault
    ///
    /// Every operation on it is blocking I/O.
    fn entry(profile: &CredentialProfile) -> Result<keyring::Entry, CredentialError> {
        keyring::Entry::new(profile.service(), profile.account()).map_err(platform_error)
    }
}

impl Default for KeychainCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for KeychainCredentialStore {
    async fn store(
        &self,
        profile: &CredentialProfile,
        password: &SecureString,
    ) -> Result<(), CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::InvalidFormat);
        }
        Self::entry(profile)?
            .set_password(password.as_str())
            .map_err(platform_error)?;
        tracing::debug!(%profile, "Cached administrator password");
        Ok(())
    }

    async fn retrieve(
        &self,
        profile: &CredentialProfile,
    ) -> Result<Option<SecureString>, CredentialError> {
        match Self::entry(profile)?.get_password() {
            Ok(secret) => Ok(Some(SecureString::new(secret))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(platform_error(e)),
        }
    }

    async fn delete(&self, profile: &CredentialProfile) -> Result<(), CredentialError> {
        match Self::entry(profile)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => {
                tracing::debug!(%profile, "Removed cached administrator password");
                Ok(())
            }
            Err(e) => Err(platform_error(e)),
        }
    }
}

fn platform_error(err: keyring::Error) -> CredentialError {
    CredentialError::Platform(err.to_string())
}
