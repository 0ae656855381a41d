//! # Application-Wide Constants
//!
//! Centralized command paths, output markers, and storage keys used throughout
//! dnsswitch.
//!
//! ## Design Rationale
//!
//! Every external command this crate scrapes has an informal text contract.
//! Keeping the prefixes and sentinels here means the parsers in
//! [`crate::core::parse`] and their tests read from one source of truth.
//!
//! ## Usage
//!
//! ```rust
//! use dnsswitch::constants::*;
//!
//! assert_eq!(AUTOMATIC_DNS_TOKEN, "Empty");
//! ```

// ============================================================================
// External Commands
// ============================================================================

/// Routing table query (`route -n get default`)
pub const ROUTE_BIN: &str = "/sbin/route";

/// Network configuration tool used for every service/DNS query and mutation
pub const NETWORKSETUP_BIN: &str = "/usr/sbin/networksetup";

/// Privilege-escalation front-end. Reads the password from stdin with `-S`.
pub const SUDO_BIN: &str = "/usr/bin/sudo";

/// Shell used to run the privileged command string
pub const SHELL_BIN: &str = "/bin/sh";

// ============================================================================
// Command Output Contracts
// ============================================================================

/// Field in `route -n get default` output naming the outgoing interface
pub const ROUTE_INTERFACE_PREFIX: &str = "interface: ";

/// First line of each `-listallhardwareports` block
pub const HARDWARE_PORT_PREFIX: &str = "Hardware Port: ";

/// Device line following a hardware port line
pub const DEVICE_PREFIX: &str = "Device: ";

/// IPv4 address line in `-getinfo <service>` output
///
/// IPv6 lines read `IPv6 IP address: ...`, so this must only match at the
/// start of a line.
pub const IPV4_ADDRESS_PREFIX: &str = "IP address: ";

/// Value reported for an IPv4 address on an inactive service
pub const NULL_ADDRESS: &str = "(null)";

/// Header line of `-listallnetworkservices`
pub const SERVICES_HEADER_MARKER: &str = "An asterisk";

/// Footnote marker occasionally appended to service listings
pub const SERVICES_NOTE_MARKER: &str = "Note:";

/// Leading marker on a disabled network service
pub const DISABLED_SERVICE_MARKER: char = '*';

/// Phrase printed by `-getdnsservers` when no resolvers are configured
///
/// Full form: `There aren't any DNS Servers set on Wi-Fi.`
pub const NO_DNS_SENTINEL: &str = "There aren't any DNS Servers set on";

/// Wire token that tells `-setdnsservers` to clear explicit resolvers
pub const AUTOMATIC_DNS_TOKEN: &str = "Empty";

/// Name prefixes of virtual tunnel interfaces (VPN, PPP, IPsec)
///
/// These never show up in `-listallhardwareports`, so they cannot be targets
/// of `-setdnsservers`.
pub const VIRTUAL_TUNNEL_PREFIXES: &[&str] = &["utun", "ppp", "ipsec"];

// ============================================================================
// Credential Vault
// ============================================================================

/// Keychain service under which the administrator password is cached
pub const KEYCHAIN_SERVICE: &str = "dnsswitch.admin";

/// Keychain account under which the administrator password is cached
pub const KEYCHAIN_ACCOUNT: &str = "administrator";

/// Reason shown to the operator when a password is requested
pub const CREDENTIAL_PROMPT_REASON: &str =
    "dnsswitch needs an administrator password to change DNS settings";

// ============================================================================
// Database / Storage
// ============================================================================

/// Application directory name under the user's data directory
pub const APP_DIR_NAME: &str = "DnsSwitch";

/// Environment variable overriding the application data directory
pub const HOME_ENV_VAR: &str = "DNSSWITCH_HOME";

/// Key-value store scope type for global settings
pub const KV_SCOPE_TYPE: &str = "global";

/// Key-value store scope ID for default/global settings
pub const KV_SCOPE_ID: &str = "default";

/// KV key holding the resolver list captured before the last switch
pub const KV_PREVIOUS_DNS: &str = "dnsswitch_previous_dns";

// ============================================================================
// Defaults
// ============================================================================

/// Resolvers applied by `connect` when neither config nor CLI overrides them
pub const DEFAULT_TARGET_SERVERS: &[&str] = &["178.22.122.101", "185.51.200.1"];

/// Label reported by `get_active_interface` when no service resolves
pub const UNKNOWN_CONNECTION: &str = "Unknown Connection";

/// Maximum log file size before it is rotated to `.log.bak`
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;
