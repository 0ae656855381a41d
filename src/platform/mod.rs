//! Platform-specific implementations (macOS host)
//!
//! All process spawning, Keychain access and terminal I/O is isolated here.

pub mod keychain;
pub mod networksetup;
pub mod sudo;
pub mod terminal;

pub use keychain::KeychainCredentialStore;
pub use networksetup::MacNetworkSetup;
pub use sudo::SudoEscalator;
pub use terminal::TerminalPrompt;
