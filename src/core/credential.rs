//! Platform-agnostic credential storage trait

use crate::models::{CredentialProfile, SecureString};
use crate::utils::CredentialError;
use async_trait::async_trait;

/// Platform-agnostic storage for the cached administrator password
///
/// Implementations handle platform-specific secure storage (macOS Keychain in
/// production, memory in tests).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Store the password under a profile, replacing any existing one
    ///
    /// # Security
    /// - MUST use OS-provided secure storage
    /// - MUST NOT log password values
    async fn store(
        &self,
        profile: &CredentialProfile,
        password: &SecureString,
    ) -> Result<(), CredentialError>;

    /// Retrieve the password for a profile
    ///
    /// # Returns
    /// * `Ok(Some(password))` - If a password is cached
    /// * `Ok(None)` - If nothing is cached (not an error)
    /// * `Err(CredentialError)` - If the vault could not be read
    async fn retrieve(
        &self,
        profile: &CredentialProfile,
    ) -> Result<Option<SecureString>, CredentialError>;

    /// Check if a password is cached for the profile
    async fn exists(&self, profile: &CredentialProfile) -> Result<bool, CredentialError> {
        Ok(self.retrieve(profile).await?.is_some())
    }

    /// Delete the cached password
    ///
    /// # Returns
    /// * `Ok(())` - Success (idempotent - succeeds even if nothing is cached)
    async fn delete(&self, profile: &CredentialProfile) -> Result<(), CredentialError>;
}
