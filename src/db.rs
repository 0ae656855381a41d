//! # Database Layer
//!
//! SQLite-based persistence for the resolver list captured before a switch.
//!
//! ## Database Location
//!
//! Database file: `~/Library/Application Support/DnsSwitch/dnsswitch.db` (macOS),
//! or `$DNSSWITCH_HOME/dnsswitch.db` when the override is set.
//!
//! ## Concurrency and Durability
//!
//! - **WAL Mode**: Write-Ahead Logging so a status read never blocks a save
//! - **FULL Sync**: `synchronous=FULL` ensures the restore point survives power loss
//! - **Immediate Transactions**: writes take the lock up front
//! - **Static Mutexes**: `OPEN_LOCK` serializes connection setup and
//!   `SCHEMA_LOCK` serializes schema creation; both recover from poisoning
//!
//! ## Schema
//!
//! - **`meta`**: `schema_version`
//! - **`kv`**: Key-value storage
//!   - Composite key: `(scope_type, scope_id, key)`
//!   - Used for: the previous-DNS entry (JSON array of strings)

use crate::constants::{APP_DIR_NAME, HOME_ENV_VAR, KV_PREVIOUS_DNS, KV_SCOPE_ID, KV_SCOPE_TYPE};
use crate::core::DnsStateStore;
use crate::models::DnsServerList;
use crate::utils::StoreError;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

const DB_FILE_NAME: &str = "dnsswitch.db";
const SCHEMA_VERSION: &str = "1";

/// Returns the application data directory, creating it if needed.
///
/// `$DNSSWITCH_HOME` wins; otherwise `<user data dir>/DnsSwitch`.
pub fn get_data_dir() -> Result<PathBuf, StoreError> {
    let target = match std::env::var_os(HOME_ENV_VAR) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::data_dir()
            .ok_or(StoreError::MissingDataDir(HOME_ENV_VAR))?
            .join(APP_DIR_NAME),
    };
    fs::create_dir_all(&target)?;
    Ok(target)
}

/// Returns `<data dir>/dnsswitch.db`.
pub fn get_db_path() -> Result<PathBuf, StoreError> {
    Ok(get_data_dir()?.join(DB_FILE_NAME))
}

/// Opens the database at `path`, applies PRAGMAs, and ensures the schema exists.
pub fn open_db(path: &Path) -> Result<Connection, StoreError> {
    let _guard = open_lock().lock().unwrap_or_else(|p| {
        tracing::warn!("Recovered from poisoned mutex 'open_lock' - previous thread panicked");
        p.into_inner()
    });

    let conn = open_connection(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn schema_lock() -> &'static Mutex<()> {
    static SCHEMA_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    SCHEMA_LOCK.get_or_init(|| Mutex::new(()))
}

fn open_lock() -> &'static Mutex<()> {
    static OPEN_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    OPEN_LOCK.get_or_init(|| Mutex::new(()))
}

/// Creates tables if missing and records the schema version in `meta`.
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    let _guard = schema_lock().lock().unwrap_or_else(|p| {
        tracing::warn!("Recovered from poisoned mutex 'schema_lock' - previous thread panicked");
        p.into_inner()
    });

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS kv (
            scope_type TEXT NOT NULL,
            scope_id   TEXT NOT NULL,
            key        TEXT NOT NULL,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_type, scope_id, key)
        );
        ",
    )?;

    conn.execute(
        "INSERT INTO meta(key, value) VALUES('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Fetches a value from the kv table for a given scope and key.
pub fn kv_get(
    conn: &Connection,
    scope_type: &str,
    scope_id: &str,
    key: &str,
) -> Result<Option<String>, StoreError> {
    conn.query_row(
        "SELECT value FROM kv WHERE scope_type = ?1 AND scope_id = ?2 AND key = ?3",
        (scope_type, scope_id, key),
        |row| row.get(0),
    )
    .optional()
    .map_err(StoreError::from)
}

/// Inserts or updates a value in the kv table and bumps updated_at.
pub fn kv_set(
    conn: &Connection,
    scope_type: &str,
    scope_id: &str,
    key: &str,
    value: &str,
) -> Result<(), StoreError> {
    conn.execute(
        "
        INSERT INTO kv(scope_type, scope_id, key, value)
        VALUES(?1, ?2, ?3, ?4)
        ON CONFLICT(scope_type, scope_id, key)
        DO UPDATE SET value = excluded.value, updated_at = datetime('now')
        ",
        (scope_type, scope_id, key, value),
    )?;
    Ok(())
}

fn open_connection(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

fn apply_pragmas(conn: &Connection) -> Result<(), StoreError> {
    conn.busy_timeout(Duration::from_millis(5_000))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "FULL")?;
    Ok(())
}

/// [`DnsStateStore`] backed by the `kv` table
///
/// Each call opens its own connection, so the store is cheap to share.
pub struct SqliteStateStore {
    path: PathBuf,
}

impl SqliteStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default database location.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(get_db_path()?))
    }
}

impl DnsStateStore for SqliteStateStore {
    fn load_previous(&self) -> Result<Option<DnsServerList>, StoreError> {
        let conn = open_db(&self.path)?;
        let Some(raw) = kv_get(&conn, KV_SCOPE_TYPE, KV_SCOPE_ID, KV_PREVIOUS_DNS)? else {
            return Ok(None);
        };
        match serde_json::from_str::<DnsServerList>(&raw) {
            Ok(list) => Ok(Some(list)),
            Err(error) => {
                tracing::warn!(%error, "Ignoring unreadable saved DNS state");
                Ok(None)
            }
        }
    }

    fn save_previous(&self, servers: &DnsServerList) -> Result<(), StoreError> {
        let value = serde_json::to_string(servers)?;
        let mut conn = open_db(&self.path)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        kv_set(&tx, KV_SCOPE_TYPE, KV_SCOPE_ID, KV_PREVIOUS_DNS, &value)?;
        tx.commit()?;
        Ok(())
    }
}
