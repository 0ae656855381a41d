//! Error types for dnsswitch
//!
//! All error types use thiserror for clean error handling.
//! SECURITY: Error messages MUST NOT contain passwords or sensitive data.

/// Caller-facing result of a connect/disconnect operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DnsError {
    #[error("No active network service found")]
    NoNetwork,

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// Carries the physical service beneath the tunnel so the caller can retry with force
    #[error("VPN is active; physical service is '{0}'")]
    VpnActive(String),

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Failed to start privileged command: {0}")]
    ScriptInit(String),

    #[error("Failed to persist DNS state: {0}")]
    Storage(String),
}

impl DnsError {
    /// Stable error code exposed to the orchestrating caller
    pub fn code(&self) -> &'static str {
        match self {
            DnsError::NoNetwork => "NO_NET",
            DnsError::InvalidArgs(_) => "INVALID_ARGS",
            DnsError::VpnActive(_) => "VPN_ACTIVE",
            DnsError::Auth(_) => "AUTH_ERROR",
            DnsError::ScriptInit(_) => "SCRIPT_INIT_ERROR",
            DnsError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Errors from read-only system queries
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with status {status}: {output}")]
    Status {
        program: String,
        status: i32,
        output: String,
    },

    #[error("'{0}' produced non-UTF-8 output")]
    Encoding(String),
}

/// Errors from the privilege-escalation front-end
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscalationError {
    #[error("Privilege escalation unavailable: {0}")]
    Init(String),

    #[error("Privileged command rejected: {0}")]
    Rejected(String),
}

/// Errors from credential storage operations
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Keychain error: {0}")]
    Platform(String),

    #[error("Invalid credential format")]
    InvalidFormat,
}

/// Errors from the durable key-value store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No data directory available; set {0}")]
    MissingDataDir(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for DnsError {
    fn from(err: StoreError) -> Self {
        DnsError::Storage(err.to_string())
    }
}

/// Errors from loading or writing the TOML configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
