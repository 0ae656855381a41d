//! Terminal password prompt

use crate::core::CredentialProvider;
use crate::models::SecureString;

/// [`CredentialProvider`] reading a hidden password from the controlling terminal
///
/// An empty line or an unreadable terminal counts as the operator declining.
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        TerminalPrompt
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for TerminalPrompt {
    fn request_password(&self, reason: &str) -> Option<SecureString> {
        eprintln!("{}", reason);
        match rpassword::prompt_password("Administrator password: ") {
            Ok(entered) => non_empty(SecureString::new(entered)),
            Err(error) => {
                tracing::debug!(%error, "Password prompt unavailable");
                None
            }
        }
    }

    fn notify_auth_failure(&self, message: &str) {
        eprintln!("Authentication failed: {}", message);
    }
}

fn non_empty(password: SecureString) -> Option<SecureString> {
    if password.as_str().trim().is_empty() {
        None
    } else {
        Some(password)
    }
}
