//! macOS system queries via `route` and `networksetup`

use crate::constants::{NETWORKSETUP_BIN, ROUTE_BIN};
use crate::core::NetworkSetup;
use crate::models::ServiceName;
use crate::utils::CommandError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// [`NetworkSetup`] backed by the real macOS commands
///
/// No timeout is applied; a hung command hangs the calling operation.
pub struct MacNetworkSetup {
    route_bin: String,
    networksetup_bin: String,
}

impl MacNetworkSetup {
    pub fn new() -> Self {
        Self {
            route_bin: ROUTE_BIN.to_string(),
            networksetup_bin: NETWORKSETUP_BIN.to_string(),
        }
    }

    async fn networksetup(&self, args: &[&str]) -> Result<String, CommandError> {
        run_query(&self.networksetup_bin, args).await
    }
}

impl Default for MacNetworkSetup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkSetup for MacNetworkSetup {
    async fn default_route(&self) -> Result<String, CommandError> {
        run_query(&self.route_bin, &["-n", "get", "default"]).await
    }

    async fn list_hardware_ports(&self) -> Result<String, CommandError> {
        self.networksetup(&["-listallhardwareports"]).await
    }

    async fn list_network_services(&self) -> Result<String, CommandError> {
        self.networksetup(&["-listallnetworkservices"]).await
    }

    async fn service_info(&self, service: &ServiceName) -> Result<String, CommandError> {
        self.networksetup(&["-getinfo", service.as_str()]).await
    }

    async fn dns_servers(&self, service: &ServiceName) -> Result<String, CommandError> {
        self.networksetup(&["-getdnsservers", service.as_str()]).await
    }
}

/// Run an unprivileged command and return its stdout.
pub(crate) async fn run_query(program: &str, args: &[&str]) -> Result<String, CommandError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| CommandError::Launch {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(CommandError::Status {
            program: program.to_string(),
            status: output.status.code().unwrap_or(-1),
            output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| CommandError::Encoding(program.to_string()))
}
