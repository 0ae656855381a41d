//! Interactive credential acquisition
//!
//! The executor asks a [`CredentialProvider`] for a password only after the
//! cached one is missing or rejected. The call is synchronous and must run on
//! whatever owns the operator's attention (the terminal in the CLI, the main
//! thread in a GUI host).

use crate::models::SecureString;

/// Source of operator-entered administrator passwords
pub trait CredentialProvider: Send + Sync {
    /// Ask the operator for a password.
    ///
    /// Returns `None` when the operator declines or no input is available.
    fn request_password(&self, reason: &str) -> Option<SecureString>;

    /// Tell the operator an entered password did not authorize the command.
    fn notify_auth_failure(&self, message: &str);
}
