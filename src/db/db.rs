use crate::libs::config::Config;
use crate::libs::error::StoreError;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// How long a connection waits on a lock held by another connection before
/// giving up with SQLITE_BUSY.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// One open SQLite connection with the pragmas every caller expects.
///
/// Schema preparation and each store operation open their own `Db`; nothing
/// keeps a connection alive between calls.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database configured for this user, creating the file if needed.
    pub fn new() -> anyhow::Result<Db> {
        let path = Config::read()?.database_path()?;
        Ok(Self::open(&path)?)
    }

    /// Opens (or creates) the database file at `path`.
    ///
    /// Foreign keys stay off: `task.project` and `taskhistory.task_id` are
    /// plain values, not enforced references.
    pub fn open(path: &Path) -> Result<Db, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
        Ok(Db { conn })
    }
}
