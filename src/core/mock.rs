//! Mock collaborators for testing without touching the real system
//!
//! Provides realistic `route`/`networksetup` output for a handful of network
//! layouts, plus in-memory stand-ins for the keychain, the password prompt, the
//! escalation front-end, and the previous-DNS store. [`MockEscalator`] can be
//! wired to a [`MockNetworkSetup`] so `-setdnsservers` commands actually change
//! what later queries report.

use super::credential::CredentialStore;
use super::executor::PrivilegeEscalator;
use super::network::NetworkSetup;
use super::prompt::CredentialProvider;
use super::state::DnsStateStore;
use crate::constants::{AUTOMATIC_DNS_TOKEN, NO_DNS_SENTINEL};
use crate::models::{CredentialProfile, DnsServerList, SecureString, ServiceName};
use crate::utils::{CommandError, CredentialError, EscalationError, StoreError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type DnsTable = Arc<Mutex<HashMap<String, Vec<String>>>>;

const ROUTE_HEAD: &str = "   route to: default
destination: default
       mask: default
    gateway: 192.168.1.1
";

const ROUTE_TAIL: &str = "      flags: <UP,GATEWAY,DONE,STATIC,PRCLONING,GLOBAL>
";

const PORT_TAIL: &str = "Ethernet Address: 3c:22:fb:00:00:00

";

const INFO_TAIL: &str = "Subnet mask: 255.255.255.0
Router: 192.168.1.1
Client ID:
IPv6: Automatic
IPv6 IP address: none
IPv6 Router: none
";

struct MockService {
    name: String,
    device: String,
    address: Option<String>,
}

/// Mock `route`/`networksetup` backend
///
/// Services are kept in listing order. DNS state is shared with any
/// [`MockEscalator`] created via [`MockEscalator::applying_to`].
pub struct MockNetworkSetup {
    route_interface: Option<String>,
    services: Vec<MockService>,
    dns: DnsTable,
}

impl MockNetworkSetup {
    fn new(route_interface: Option<&str>, services: Vec<(&str, &str, Option<&str>)>) -> Self {
        let dns = services
            .iter()
            .map(|(name, _, _)| (name.to_string(), Vec::new()))
            .collect();
        Self {
            route_interface: route_interface.map(str::to_string),
            services: services
                .into_iter()
                .map(|(name, device, address)| MockService {
                    name: name.to_string(),
                    device: device.to_string(),
                    address: address.map(str::to_string),
                })
                .collect(),
            dns: Arc::new(Mutex::new(dns)),
        }
    }

    /// Laptop on Wi-Fi (`en0`) with an unplugged Ethernet adapter listed first
    pub fn wifi() -> Self {
        Self::new(
            Some("en0"),
            vec![
                ("Ethernet", "en1", None),
                ("Wi-Fi", "en0", Some("192.168.1.23")),
                ("Thunderbolt Bridge", "bridge0", None),
            ],
        )
    }

    /// Desktop with both adapters up; the default route uses Ethernet
    pub fn ethernet_and_wifi() -> Self {
        Self::new(
            Some("en1"),
            vec![
                ("Ethernet", "en1", Some("10.0.0.12")),
                ("Wi-Fi", "en0", Some("10.0.0.13")),
            ],
        )
    }

    /// VPN tunnel owns the default route, Wi-Fi carries the traffic beneath it
    pub fn vpn_over_wifi() -> Self {
        Self::new(
            Some("utun3"),
            vec![
                ("Ethernet", "en1", None),
                ("Wi-Fi", "en0", Some("192.168.1.23")),
            ],
        )
    }

    /// VPN tunnel owns the default route but no physical service has an address
    pub fn vpn_without_physical() -> Self {
        Self::new(
            Some("utun3"),
            vec![("Ethernet", "en1", None), ("Wi-Fi", "en0", None)],
        )
    }

    /// No default route and no service holding an address
    pub fn offline() -> Self {
        Self::new(
            None,
            vec![("Ethernet", "en1", None), ("Wi-Fi", "en0", None)],
        )
    }

    pub fn with_default_route_interface(mut self, iface: &str) -> Self {
        self.route_interface = Some(iface.to_string());
        self
    }

    pub fn without_default_route(mut self) -> Self {
        self.route_interface = None;
        self
    }

    pub fn with_dns(self, service: &str, servers: &[&str]) -> Self {
        self.lock_dns().insert(
            service.to_string(),
            servers.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Resolvers currently configured on a service, `None` if the service is unknown
    pub fn current_dns(&self, service: &str) -> Option<Vec<String>> {
        self.lock_dns().get(service).cloned()
    }

    fn lock_dns(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<String>>> {
        self.dns.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn find(&self, service: &ServiceName) -> Option<&MockService> {
        self.services.iter().find(|s| s.name == service.as_str())
    }

    fn invalid_service() -> CommandError {
        CommandError::Status {
            program: "networksetup".to_string(),
            status: 4,
            output: "** Error: The parameters were not valid.".to_string(),
        }
    }
}

#[async_trait]
impl NetworkSetup for MockNetworkSetup {
    async fn default_route(&self) -> Result<String, CommandError> {
        match &self.route_interface {
            Some(iface) => Ok(format!("{ROUTE_HEAD}  interface: {iface}\n{ROUTE_TAIL}")),
            None => Err(CommandError::Status {
                program: "route".to_string(),
                status: 1,
                output: "route: writing to routing socket: not in table".to_string(),
            }),
        }
    }

    async fn list_hardware_ports(&self) -> Result<String, CommandError> {
        let mut out = String::from("\n");
        for service in &self.services {
            let (name, device) = (&service.name, &service.device);
            out.push_str(&format!("Hardware Port: {name}\nDevice: {device}\n{PORT_TAIL}"));
        }
        out.push_str("VLAN Configurations\n===================\n");
        Ok(out)
    }

    async fn list_network_services(&self) -> Result<String, CommandError> {
        let mut out =
            String::from("An asterisk (*) denotes that a network service is disabled.\n");
        for service in &self.services {
            out.push_str(&service.name);
            out.push('\n');
        }
        Ok(out)
    }

    async fn service_info(&self, service: &ServiceName) -> Result<String, CommandError> {
        let found = self.find(service).ok_or_else(Self::invalid_service)?;
        let address = found.address.as_deref().unwrap_or("(null)");
        Ok(format!("DHCP Configuration\nIP address: {address}\n{INFO_TAIL}"))
    }

    async fn dns_servers(&self, service: &ServiceName) -> Result<String, CommandError> {
        let dns = self.lock_dns();
        let servers = dns.get(service.as_str()).ok_or_else(Self::invalid_service)?;
        if servers.is_empty() {
            Ok(format!("{} {}.\n", NO_DNS_SENTINEL, service))
        } else {
            Ok(format!("{}\n", servers.join("\n")))
        }
    }
}

/// Mock `sudo` front-end that accepts exactly one password
pub struct MockEscalator {
    password: Option<String>,
    commands: Mutex<Vec<String>>,
    dns: Option<DnsTable>,
}

impl MockEscalator {
    pub fn accepting(password: &str) -> Self {
        Self {
            password: Some(password.to_string()),
            commands: Mutex::new(Vec::new()),
            dns: None,
        }
    }

    /// Front-end that cannot be launched at all
    pub fn unavailable() -> Self {
        Self {
            password: None,
            commands: Mutex::new(Vec::new()),
            dns: None,
        }
    }

    /// Apply accepted `-setdnsservers` commands to `setup`'s DNS state
    pub fn applying_to(mut self, setup: &MockNetworkSetup) -> Self {
        self.dns = Some(setup.dns.clone());
        self
    }

    /// Every command attempted, including rejected ones
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn apply(&self, command: &str) {
        let Some(dns) = &self.dns else {
            return;
        };
        let Some((_, rest)) = command.split_once("-setdnsservers ") else {
            return;
        };
        let (service, args) = match rest.strip_prefix('\'') {
            Some(quoted) => match quoted.split_once('\'') {
                Some((service, args)) => (service, args),
                None => return,
            },
            None => rest.split_once(' ').unwrap_or((rest, "")),
        };
        let servers: Vec<String> = args
            .split_whitespace()
            .filter(|arg| *arg != AUTOMATIC_DNS_TOKEN)
            .map(|arg| arg.trim_matches('\'').to_string())
            .collect();
        dns.lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(service.to_string(), servers);
    }
}

#[async_trait]
impl PrivilegeEscalator for MockEscalator {
    async fn run(&self, command: &str, password: &SecureString) -> Result<(), EscalationError> {
        let Some(expected) = &self.password else {
            return Err(EscalationError::Init(
                "sudo: No such file or directory".to_string(),
            ));
        };
        self.commands
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(command.to_string());
        if password.as_str() != expected {
            return Err(EscalationError::Rejected(
                "Sorry, try again.\nsudo: 1 incorrect password attempt".to_string(),
            ));
        }
        self.apply(command);
        Ok(())
    }
}

/// In-memory keychain holding at most one password
#[derive(Default)]
pub struct MemoryCredentialStore {
    password: Mutex<Option<String>>,
    broken: bool,
    deletes: AtomicUsize,
}

impl MemoryCredentialStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_password(password: &str) -> Self {
        Self {
            password: Mutex::new(Some(password.to_string())),
            ..Self::default()
        }
    }

    /// Store whose every operation fails
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn password(&self) -> Option<String> {
        self.password
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), CredentialError> {
        if self.broken {
            Err(CredentialError::Platform("keychain locked".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn store(
        &self,
        _profile: &CredentialProfile,
        password: &SecureString,
    ) -> Result<(), CredentialError> {
        self.check()?;
        *self.password.lock().unwrap_or_else(|p| p.into_inner()) =
            Some(password.as_str().to_string());
        Ok(())
    }

    async fn retrieve(
        &self,
        _profile: &CredentialProfile,
    ) -> Result<Option<SecureString>, CredentialError> {
        self.check()?;
        Ok(self.password().map(SecureString::new))
    }

    async fn delete(&self, _profile: &CredentialProfile) -> Result<(), CredentialError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.password.lock().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }
}

/// Prompt that replays canned answers (`None` = operator declined)
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Option<String>>>,
    prompts: AtomicUsize,
    notices: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: Vec<Option<&str>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| a.map(str::to_string)).collect()),
            prompts: AtomicUsize::new(0),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn failure_notices(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl CredentialProvider for ScriptedPrompt {
    fn request_password(&self, _reason: &str) -> Option<SecureString> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .flatten()
            .map(SecureString::new)
    }

    fn notify_auth_failure(&self, message: &str) {
        self.notices
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(message.to_string());
    }
}

/// In-memory previous-DNS store
#[derive(Default)]
pub struct MemoryStateStore {
    saved: Mutex<Option<DnsServerList>>,
    failing: bool,
    saves: AtomicUsize,
}

impl MemoryStateStore {
    pub fn with_saved(saved: DnsServerList) -> Self {
        Self {
            saved: Mutex::new(Some(saved)),
            ..Self::default()
        }
    }

    /// Store whose writes always fail
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Option<DnsServerList> {
        self.saved.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl DnsStateStore for MemoryStateStore {
    fn load_previous(&self) -> Result<Option<DnsServerList>, StoreError> {
        Ok(self.saved())
    }

    fn save_previous(&self, servers: &DnsServerList) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "database is read-only",
            )));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.saved.lock().unwrap_or_else(|p| p.into_inner()) = Some(servers.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_escalator_applies_quoted_service() {
        let setup = MockNetworkSetup::new(
            Some("en5"),
            vec![("USB 10/100/1000 LAN", "en5", Some("10.1.1.1"))],
        );
        let escalator = MockEscalator::accepting("pw").applying_to(&setup);

        escalator
            .run(
                "/usr/sbin/networksetup -setdnsservers 'USB 10/100/1000 LAN' 1.1.1.1 8.8.8.8",
                &SecureString::new("pw"),
            )
            .await
            .unwrap();

        assert_eq!(
            setup.current_dns("USB 10/100/1000 LAN"),
            Some(vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()])
        );
    }

    #[tokio::test]
    async fn test_empty_dns_reports_sentinel() {
        let setup = MockNetworkSetup::wifi();
        let raw = setup.dns_servers(&ServiceName::new("Wi-Fi")).await.unwrap();
        assert_eq!(raw, "There aren't any DNS Servers set on Wi-Fi.\n");
    }
}
