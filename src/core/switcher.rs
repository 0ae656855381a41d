//! Connect/disconnect orchestration
//!
//! [`DnsSwitcher`] is the surface a GUI or CLI drives. It resolves the active
//! service, keeps the pre-switch resolver list in the [`DnsStateStore`], and
//! applies changes through the [`PrivilegedExecutor`].

use super::executor::PrivilegedExecutor;
use super::network::{get_dns_servers, resolve_active_service, NetworkSetup};
use super::state::DnsStateStore;
use crate::constants::{NETWORKSETUP_BIN, UNKNOWN_CONNECTION};
use crate::models::{DnsChange, DnsServerList, ServiceName};
use crate::normalize::normalize_dns_servers;
use crate::utils::DnsError;
use std::borrow::Cow;
use std::sync::Arc;

/// Build the privileged `-setdnsservers` command line for a service.
///
/// Every argument is shell-quoted where needed; the result is run by `/bin/sh`.
pub fn build_set_dns_command(service: &ServiceName, servers: &DnsServerList) -> String {
    let mut parts: Vec<Cow<'_, str>> = vec![
        Cow::Borrowed(NETWORKSETUP_BIN),
        Cow::Borrowed("-setdnsservers"),
        shell_escape::unix::escape(Cow::Borrowed(service.as_str())),
    ];
    parts.extend(
        servers
            .wire_tokens()
            .into_iter()
            .map(|token| shell_escape::unix::escape(Cow::Borrowed(token))),
    );
    parts.join(" ")
}

pub struct DnsSwitcher {
    setup: Arc<dyn NetworkSetup>,
    state: Arc<dyn DnsStateStore>,
    executor: PrivilegedExecutor,
}

impl DnsSwitcher {
    pub fn new(
        setup: Arc<dyn NetworkSetup>,
        state: Arc<dyn DnsStateStore>,
        executor: PrivilegedExecutor,
    ) -> Self {
        Self {
            setup,
            state,
            executor,
        }
    }

    pub fn executor(&self) -> &PrivilegedExecutor {
        &self.executor
    }

    /// Point the active service at `servers`.
    ///
    /// With a VPN owning the default route this fails with `VpnActive` unless
    /// `force` is set. The current list is saved first unless it already equals
    /// the target, so repeated connects never clobber the restore point. The
    /// returned change carries the normalized list that was applied.
    pub async fn connect(&self, servers: &[String], force: bool) -> Result<DnsChange, DnsError> {
        let target = DnsServerList::new(normalize_dns_servers(servers)?);

        let active = resolve_active_service(self.setup.as_ref())
            .await
            .ok_or(DnsError::NoNetwork)?;
        if active.is_vpn && !force {
            tracing::info!(service = %active.name, "VPN active; connect needs force");
            return Err(DnsError::VpnActive(active.name.to_string()));
        }

        let current = get_dns_servers(self.setup.as_ref(), &active.name).await;
        if current != target {
            tracing::info!(service = %active.name, previous = %current, "Saving current DNS");
            self.state.save_previous(&current)?;
        } else {
            tracing::debug!(
                service = %active.name,
                "DNS already matches target; keeping saved state"
            );
        }

        let command = build_set_dns_command(&active.name, &target);
        self.executor.run_with_caching(&command).await?;
        tracing::info!(service = %active.name, servers = %target, "DNS switched");
        Ok(DnsChange {
            service: active.name,
            servers: target,
        })
    }

    /// Restore the list saved by the last qualifying connect.
    ///
    /// Missing or "none configured" state restores automatic DNS.
    pub async fn disconnect(&self) -> Result<DnsChange, DnsError> {
        let active = resolve_active_service(self.setup.as_ref())
            .await
            .ok_or(DnsError::NoNetwork)?;

        let saved = self.state.load_previous()?.unwrap_or_default();
        let target = saved.restore_target();

        let command = build_set_dns_command(&active.name, &target);
        self.executor.run_with_caching(&command).await?;
        tracing::info!(service = %active.name, servers = %target, "DNS restored");
        Ok(DnsChange {
            service: active.name,
            servers: target,
        })
    }

    /// True when every expected address is among the active service's resolvers.
    pub async fn get_status(&self, expected: &[String]) -> bool {
        let Ok(expected) = normalize_dns_servers(expected) else {
            return false;
        };
        let Some(active) = resolve_active_service(self.setup.as_ref()).await else {
            return false;
        };
        get_dns_servers(self.setup.as_ref(), &active.name)
            .await
            .contains_all(&expected)
    }

    /// Name of the active service, or "Unknown Connection".
    pub async fn get_active_interface(&self) -> String {
        match resolve_active_service(self.setup.as_ref()).await {
            Some(active) => active.name.to_string(),
            None => UNKNOWN_CONNECTION.to_string(),
        }
    }
}
