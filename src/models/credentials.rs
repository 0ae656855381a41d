//! Credential model types for dnsswitch
//!
//! SECURITY: Credential types implement Drop to clear sensitive data.

use crate::constants::{KEYCHAIN_ACCOUNT, KEYCHAIN_SERVICE};
use std::fmt;

/// Password that zeros memory on drop
///
/// SECURITY: This type never implements Display or Debug in a way that reveals the password.
pub struct SecureString(String);

impl Clone for SecureString {
    fn clone(&self) -> Self {
        SecureString(self.0.clone())
    }
}

impl SecureString {
    /// Create a new secure string
    pub fn new(password: impl Into<String>) -> Self {
        SecureString(password.into())
    }

    /// Get the password as a string slice
    ///
    /// Use this sparingly and only when handing the secret to the escalation front-end
    /// or the keychain.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the length of the password
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the password is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for SecureString {
    fn drop(&mut self) {
        // SAFETY: We own this String and are zeroing it before drop; all zero bytes
        // remain valid UTF-8.
        unsafe {
            let bytes = self.0.as_bytes_mut();
            for byte in bytes {
                std::ptr::write_volatile(byte, 0);
            }
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(*** {} bytes ***)", self.0.len())
    }
}

/// Keychain coordinates of the cached administrator password
///
/// This is just an identifier, not the secret itself. At most one secret exists per
/// profile; storing again overwrites it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CredentialProfile {
    service: String,
    account: String,
}

impl CredentialProfile {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        CredentialProfile {
            service: service.into(),
            account: account.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn account(&self) -> &str {
        &self.account
    }
}

impl Default for CredentialProfile {
    fn default() -> Self {
        CredentialProfile::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
    }
}

impl fmt::Display for CredentialProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.account)
    }
}
