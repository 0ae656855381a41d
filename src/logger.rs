//! Logging setup
//!
//! Installs a global `tracing` subscriber:
//! - `DNSSWITCH_LOG` holds filter directives (default `info`);
//!   `DNSSWITCH_LOG_VERBOSE=1` raises the default to `debug`
//! - debug builds always log to stderr
//! - the log file `<data dir>/logs/dnsswitch.log` is written in debug builds,
//!   or in release builds when `DNSSWITCH_ENABLE_LOGGING=1`
//!
//! SECURITY: never pass a password to a tracing macro.

use crate::constants::MAX_LOG_BYTES;
use crate::db::get_data_dir;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

const LOG_ENV_VAR: &str = "DNSSWITCH_LOG";
const VERBOSE_ENV_VAR: &str = "DNSSWITCH_LOG_VERBOSE";
const ENABLE_ENV_VAR: &str = "DNSSWITCH_ENABLE_LOGGING";
const LOG_FILE_NAME: &str = "dnsswitch.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub directives: String,
    pub file_enabled: bool,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let verbose = lookup(VERBOSE_ENV_VAR).is_some_and(|v| v == "1");
        let default = if verbose { "debug" } else { "info" };
        let directives = lookup(LOG_ENV_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string());

        // Debug builds always log to file; release builds only on request
        let file_enabled =
            cfg!(debug_assertions) || lookup(ENABLE_ENV_VAR).is_some_and(|v| v == "1");

        Self {
            directives,
            file_enabled,
        }
    }
}

/// Returns `<data dir>/logs/dnsswitch.log`, creating the directory.
pub fn log_file_path() -> io::Result<PathBuf> {
    let dir = get_data_dir().map_err(io::Error::other)?.join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir.join(LOG_FILE_NAME))
}

/// Moves the log aside to `.log.bak` once it grows past `max_bytes`.
pub fn rotate_if_needed(path: &Path, max_bytes: u64) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > max_bytes => {
            let backup = path.with_extension("log.bak");
            let _ = fs::remove_file(&backup);
            fs::rename(path, &backup)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn open_log_file() -> io::Result<File> {
    let path = log_file_path()?;
    rotate_if_needed(&path, MAX_LOG_BYTES)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init() {
    init_with(LogSettings::from_env());
}

pub fn init_with(settings: LogSettings) {
    let filter = EnvFilter::try_new(&settings.directives).unwrap_or_else(|error| {
        eprintln!(
            "Ignoring invalid {LOG_ENV_VAR} directives '{}': {error}",
            settings.directives
        );
        EnvFilter::new("info")
    });

    let file = if settings.file_enabled {
        match open_log_file() {
            Ok(file) => Some(file),
            Err(error) => {
                eprintln!("Log file unavailable: {error}");
                None
            }
        }
    } else {
        None
    };

    let stderr_layer = cfg!(debug_assertions).then(|| {
        fmt::layer().with_writer(io::stderr).with_target(false)
    });
    let file_layer = file.map(|file| {
        fmt::layer().with_ansi(false).with_writer(Mutex::new(file))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}
