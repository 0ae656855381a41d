//! Privileged command execution with a cached administrator password
//!
//! A mutation runs at most twice per call: once with the keychain-cached
//! password (if any) and once with a freshly prompted one. A cached password
//! that fails is deleted before the prompt. Nothing is retried beyond that one
//! prompt.

use super::credential::CredentialStore;
use super::prompt::CredentialProvider;
use crate::constants::CREDENTIAL_PROMPT_REASON;
use crate::models::{CredentialProfile, SecureString};
use crate::utils::{DnsError, EscalationError};
use async_trait::async_trait;
use std::sync::Arc;

/// Reason reported when the operator declines the prompt
pub const AUTH_CANCELLED: &str = "cancelled";

/// Reason reported when a freshly entered password is rejected
pub const AUTH_FAILED: &str = "authentication failed";

/// Privilege-escalation front-end
///
/// Runs a shell command string as the administrator, handing over `password` on
/// standard input. Success is a zero exit status.
#[async_trait]
pub trait PrivilegeEscalator: Send + Sync {
    async fn run(&self, command: &str, password: &SecureString) -> Result<(), EscalationError>;
}

/// Runs privileged commands, reusing and maintaining the cached password
pub struct PrivilegedExecutor {
    escalator: Arc<dyn PrivilegeEscalator>,
    credentials: Arc<dyn CredentialStore>,
    provider: Arc<dyn CredentialProvider>,
    profile: CredentialProfile,
}

impl PrivilegedExecutor {
    pub fn new(
        escalator: Arc<dyn PrivilegeEscalator>,
        credentials: Arc<dyn CredentialStore>,
        provider: Arc<dyn CredentialProvider>,
        profile: CredentialProfile,
    ) -> Self {
        Self {
            escalator,
            credentials,
            provider,
            profile,
        }
    }

    /// Run `command` with an explicit password.
    pub async fn run(&self, command: &str, password: &SecureString) -> Result<(), EscalationError> {
        self.escalator.run(command, password).await
    }

    /// Run `command`, trying the cached password first and prompting once if needed.
    pub async fn run_with_caching(&self, command: &str) -> Result<(), DnsError> {
        if let Some(cached) = self.cached_password().await {
            match self.run(command, &cached).await {
                Ok(()) => {
                    tracing::debug!("Privileged command succeeded with cached password");
                    return Ok(());
                }
                Err(EscalationError::Init(msg)) => return Err(DnsError::ScriptInit(msg)),
                Err(EscalationError::Rejected(output)) => {
                    tracing::warn!(
                        output = %output,
                        "Cached password rejected; discarding it"
                    );
                    self.forget().await;
                }
            }
        }

        let Some(entered) = self.provider.request_password(CREDENTIAL_PROMPT_REASON) else {
            tracing::info!("Operator declined the password prompt");
            return Err(DnsError::Auth(AUTH_CANCELLED.to_string()));
        };

        match self.run(command, &entered).await {
            Ok(()) => {
                if let Err(error) = self.credentials.store(&self.profile, &entered).await {
                    tracing::warn!(%error, profile = %self.profile, "Failed to cache password");
                }
                Ok(())
            }
            Err(EscalationError::Init(msg)) => Err(DnsError::ScriptInit(msg)),
            Err(EscalationError::Rejected(output)) => {
                tracing::error!(
                    output = %output,
                    "Privileged command failed with entered password"
                );
                self.provider
                    .notify_auth_failure("The administrator password was not accepted.");
                Err(DnsError::Auth(AUTH_FAILED.to_string()))
            }
        }
    }

    /// Delete the cached password, logging rather than failing on vault errors.
    pub async fn forget(&self) {
        if let Err(error) = self.credentials.delete(&self.profile).await {
            tracing::warn!(%error, profile = %self.profile, "Failed to delete cached password");
        }
    }

    /// Whether a password is cached; an unreadable vault counts as "no".
    pub async fn has_cached_password(&self) -> bool {
        match self.credentials.exists(&self.profile).await {
            Ok(found) => found,
            Err(error) => {
                tracing::warn!(%error, profile = %self.profile, "Failed to query cached password");
                false
            }
        }
    }

    async fn cached_password(&self) -> Option<SecureString> {
        match self.credentials.retrieve(&self.profile).await {
            Ok(found) => found,
            Err(error) => {
                tracing::warn!(%error, profile = %self.profile, "Failed to read cached password");
                None
            }
        }
    }
}
