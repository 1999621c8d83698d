//! Schema versioning, inspection and the destructive rebuild path.
//!
//! Every schema change is a numbered migration recorded in the `migrations`
//! table. Opening a database first classifies it with [`inspect_schema`]:
//!
//! - `Empty`: no tables yet; all migrations run.
//! - `Outdated`: the tables we know are readable but some migrations are
//!   missing (this includes databases written before versioning existed);
//!   the pending migrations run and adopt the existing tables.
//! - `Current`: nothing to do.
//! - `Mismatched`: a known table exists but cannot be read with the current
//!   column set. The only way forward is a rebuild: the file is copied to
//!   `<path>.backup` (unless that copy already exists), every table is
//!   dropped and the schema is recreated. Data in the old tables is lost
//!   apart from that backup, so the rebuild is announced on the console and
//!   can be refused with [`MismatchPolicy::Fail`].
//!
//! ```rust,no_run
//! use soulplanner::db::db::Db;
//! use soulplanner::db::migrations::{inspect_schema, MigrationManager};
//!
//! let mut db = Db::open("tasks.db".as_ref())?;
//! println!("{:?}", inspect_schema(&db.conn)?);
//! MigrationManager::new().run_migrations(&mut db.conn)?;
//! # Ok::<(), soulplanner::libs::error::StoreError>(())
//! ```

use crate::libs::config::BACKUP_SUFFIX;
use crate::libs::error::StoreError;
use crate::libs::messages::Message;
use crate::libs::task::{TaskPriority, TaskStatus};
use crate::{msg_debug, msg_error, msg_info, msg_success, msg_warning};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Transaction};
use std::fs;
use std::path::{Path, PathBuf};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

pub(crate) const TASK_TABLE: &str = "task";
pub(crate) const PROJECT_TABLE: &str = "project";
pub(crate) const HISTORY_TABLE: &str = "taskhistory";

pub(crate) const TASK_COLUMNS: &str = "id, title, description, owner, status, priority, due_date, created_date, \
     completed_date, notes, completed, project, tags, estimated_hours, actual_hours";
pub(crate) const PROJECT_COLUMNS: &str = "id, name, description, created_date, is_active, color";
pub(crate) const HISTORY_COLUMNS: &str = "id, task_id, field_name, old_value, new_value, changed_date, changed_by";

/// Tables the store reads, with the columns it selects from each.
const EXPECTED_TABLES: [(&str, &str); 3] = [
    (TASK_TABLE, TASK_COLUMNS),
    (PROJECT_TABLE, PROJECT_COLUMNS),
    (HISTORY_TABLE, HISTORY_COLUMNS),
];

/// Classification of an opened database file.
///
/// Produced by [`inspect_schema`] and kept on the store as the state found
/// when it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// No tables at all: a new file.
    Empty,
    /// Tables are readable but migrations are missing, including files
    /// written before migrations were tracked.
    Outdated,
    /// Every migration is applied.
    Current,
    /// A table exists that the current column set cannot be read from.
    Mismatched,
}

/// What to do with a database whose tables do not match the current schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// Back up the file, drop every table and recreate the schema.
    #[default]
    Rebuild,
    /// Leave the file alone and fail with [`StoreError::SchemaMismatch`].
    Fail,
}

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Ordered registry of all schema migrations.
///
/// Applied versions are recorded in the `migrations` table. Pending
/// migrations run in version order inside a single transaction, so a
/// failure leaves the file at its previous version.
///
/// ## Versions
///
/// 1. `create_core_tables`: the `task`, `project` and `taskhistory` tables
/// 2. `add_query_indices`: indices for filtered listings and history lookups
/// 3. `canonical_task_labels`: rewrites stored status and priority text to
///    the labels the filters compare against
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    /// Creates a manager with every known migration registered.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use soulplanner::db::db::Db;
    /// use soulplanner::db::migrations::MigrationManager;
    ///
    /// let mut db = Db::open(std::path::Path::new("tasks.db"))?;
    /// MigrationManager::new().run_migrations(&mut db.conn)?;
    /// # Ok::<(), soulplanner::libs::error::StoreError>(())
    /// ```
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: the three core tables. Table names match files written
        // before versioning, so such files are adopted rather than rebuilt.
        self.add_migration(1, "create_core_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS task (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT,
                    owner TEXT,
                    status TEXT NOT NULL DEFAULT 'Not Started',
                    priority TEXT NOT NULL DEFAULT 'Medium',
                    due_date TEXT,
                    created_date TEXT NOT NULL,
                    completed_date TEXT,
                    notes TEXT,
                    completed BOOLEAN NOT NULL DEFAULT 0,
                    project TEXT NOT NULL,
                    tags TEXT,
                    estimated_hours REAL,
                    actual_hours REAL
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS project (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    description TEXT,
                    created_date TEXT NOT NULL,
                    is_active BOOLEAN NOT NULL DEFAULT 1,
                    color TEXT
                )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS taskhistory (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    task_id INTEGER NOT NULL,
                    field_name TEXT NOT NULL,
                    old_value TEXT,
                    new_value TEXT,
                    changed_date TEXT NOT NULL,
                    changed_by TEXT
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: indices for the filtered listings and history lookups
        self.add_migration(2, "add_query_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_task_project ON task(project)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_task_created_date ON task(created_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_task_due_date ON task(due_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_taskhistory_task_id ON taskhistory(task_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_project_name ON project(name)", [])?;
            Ok(())
        });

        // Version 3: older files spell statuses and priorities as enum names
        // ("WORKING_ON_IT", "HIGH") or leave them empty. Rewrite them to the
        // labels the filters compare against.
        self.add_migration(3, "canonical_task_labels", |tx| {
            relabel(tx, "status", |value| match value {
                Some(value) => value.parse::<TaskStatus>().ok().map(|s| s.label()),
                None => Some(TaskStatus::default().label()),
            })?;
            relabel(tx, "priority", |value| match value {
                Some(value) => value.parse::<TaskPriority>().ok().map(|p| p.label()),
                None => Some(TaskPriority::default().label()),
            })
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every migration newer than the recorded version, all in one
    /// transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<(), StoreError> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e.into());
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            msg_debug!(Message::MigrationCompleted(migration.version));
        }
        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    /// Highest applied version; 0 when nothing was applied or the
    /// `migrations` table does not exist.
    fn get_current_version(&self, conn: &Connection) -> Result<u32, StoreError> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    /// Applied migrations as (version, name, applied_at), oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>, StoreError> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

/// Rewrites every distinct value of `column` in the task table to the label
/// `canonical` maps it to. `canonical` receives the trimmed text, or `None`
/// for null and blank values; values it maps to `None` are left as they are.
fn relabel(tx: &Transaction, column: &str, canonical: fn(Option<&str>) -> Option<&'static str>) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare(&format!("SELECT DISTINCT {} FROM task", column))?;
    let stored = stmt.query_map([], |row| row.get::<_, Value>(0))?.collect::<Result<Vec<_>, _>>()?;

    let update = format!("UPDATE task SET {} = ?1 WHERE {} IS ?2", column, column);
    for value in stored {
        let text = match &value {
            Value::Text(text) => Some(text.trim().to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Real(r) => Some(r.to_string()),
            Value::Null | Value::Blob(_) => None,
        };
        let Some(label) = canonical(text.as_deref().filter(|t| !t.is_empty())) else {
            continue;
        };
        if !matches!(&value, Value::Text(text) if text == label) {
            tx.execute(&update, params![label, value])?;
        }
    }
    Ok(())
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get_db_version(conn: &Connection) -> Result<u32, StoreError> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool, StoreError> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}

fn user_tables(conn: &Connection) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'")?;
    let names = stmt.query_map([], |row| row.get::<_, String>(0))?.collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

/// Classifies the schema of an open database without modifying it.
pub fn inspect_schema(conn: &Connection) -> Result<SchemaState, StoreError> {
    let tables = user_tables(conn)?;
    if tables.is_empty() {
        return Ok(SchemaState::Empty);
    }

    let version = get_db_version(conn)?;
    for (table, columns) in EXPECTED_TABLES {
        if !tables.iter().any(|t| t == table) {
            // A versioned database must already have all of its tables
            if version > 0 {
                return Ok(SchemaState::Mismatched);
            }
            continue;
        }
        if let Err(e) = conn.prepare(&format!("SELECT {} FROM {} LIMIT 1", columns, table)) {
            msg_debug!(format!("Schema probe on '{}' failed: {}", table, e));
            return Ok(SchemaState::Mismatched);
        }
    }

    if version < MigrationManager::new().latest_version() {
        Ok(SchemaState::Outdated)
    } else {
        Ok(SchemaState::Current)
    }
}

/// Brings the database at `path` to the current schema, following `policy`
/// when the existing tables do not fit. Returns the state found on entry.
pub fn prepare_schema(conn: &mut Connection, path: &Path, policy: MismatchPolicy) -> Result<SchemaState, StoreError> {
    let state = inspect_schema(conn)?;
    let manager = MigrationManager::new();

    match state {
        SchemaState::Empty => {
            manager.run_migrations(conn)?;
            msg_debug!(Message::DatabaseCreated(path.display().to_string()));
        }
        SchemaState::Outdated => manager.run_migrations(conn)?,
        SchemaState::Current => msg_debug!(Message::DatabaseUpToDate),
        SchemaState::Mismatched => match policy {
            MismatchPolicy::Fail => return Err(StoreError::SchemaMismatch { path: path.to_path_buf() }),
            MismatchPolicy::Rebuild => rebuild_schema(conn, path)?,
        },
    }

    Ok(state)
}

/// `<path>.backup`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(BACKUP_SUFFIX);
    PathBuf::from(backup)
}

/// Backs up the database file, drops every table and recreates the schema.
/// An existing backup is never overwritten.
pub fn rebuild_schema(conn: &mut Connection, path: &Path) -> Result<(), StoreError> {
    msg_warning!(Message::SchemaMismatchDetected(path.display().to_string()));
    tracing::warn!(path = %path.display(), "rebuilding database schema");

    let backup = backup_path(path);
    if backup.exists() {
        msg_info!(Message::SchemaBackupExists(backup.display().to_string()));
    } else {
        fs::copy(path, &backup)?;
        msg_success!(Message::SchemaBackupCreated(backup.display().to_string()));
    }

    drop_all_tables(conn)?;
    MigrationManager::new().run_migrations(conn)?;
    msg_success!(Message::SchemaRebuilt);

    Ok(())
}

fn drop_all_tables(conn: &mut Connection) -> Result<(), StoreError> {
    let tables = user_tables(conn)?;
    let tx = conn.transaction()?;
    for table in tables {
        tx.execute(&format!("DROP TABLE IF EXISTS \"{}\"", table.replace('"', "\"\"")), [])?;
    }
    tx.commit()?;
    Ok(())
}
