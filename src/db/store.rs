//! The task store: an explicit handle over one database file.
//!
//! A [`Store`] is created once with [`Store::open`] and passed to whoever
//! needs it; it holds no connection, only the path and its defaults, so it
//! is cheap to share between threads. Each operation opens its own
//! connection, runs in one transaction that commits on success and rolls
//! back on any error, and closes the connection before returning.
//!
//! Public operations never return an error. A failure is logged and the
//! operation hands back its "no result" value (`None`, `false`, an empty
//! list). Only opening the store can fail.

use super::db::Db;
use super::migrations::{prepare_schema, MismatchPolicy, SchemaState};
use crate::libs::config::{Config, BATCH_SIZE, DEFAULT_PROJECT};
use crate::libs::error::StoreError;
use crate::libs::task::{TaskPriority, TaskStatus};
use parking_lot::{const_mutex, Mutex};
use rusqlite::{Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};

/// Serializes schema preparation; CRUD calls do not take it.
static INIT_LOCK: Mutex<()> = const_mutex(());

/// Defaults applied by the store plus the schema mismatch policy.
///
/// Built from the user's [`Config`] by the command layer, or with
/// [`Default`] in tests and library use.
///
/// # Example
///
/// ```rust,no_run
/// use soulplanner::db::migrations::MismatchPolicy;
/// use soulplanner::db::store::{Store, StoreOptions};
///
/// let options = StoreOptions {
///     mismatch_policy: MismatchPolicy::Fail,
///     ..StoreOptions::default()
/// };
/// let store = Store::open_with("tasks.db", options)?;
/// # Ok::<(), soulplanner::libs::error::StoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    /// Project given to new tasks that name none.
    pub default_project: String,
    pub default_status: TaskStatus,
    pub default_priority: TaskPriority,
    /// Page size used when a filter asks for no explicit limit.
    pub batch_size: usize,
    pub mismatch_policy: MismatchPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_project: DEFAULT_PROJECT.to_string(),
            default_status: TaskStatus::default(),
            default_priority: TaskPriority::default(),
            batch_size: BATCH_SIZE,
            mismatch_policy: MismatchPolicy::default(),
        }
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        Self {
            default_project: config.default_project.clone(),
            default_status: config.default_status,
            default_priority: config.default_priority,
            batch_size: config.batch_size,
            mismatch_policy: MismatchPolicy::default(),
        }
    }
}

/// Handle over one task database file.
///
/// Opening a `Store` prepares the schema once: an empty file gets the
/// tables, an older file is migrated, and a file whose tables cannot be read
/// is handled according to [`StoreOptions::mismatch_policy`]. After that the
/// handle only carries the path and defaults. Every operation opens a fresh
/// connection, so a `Store` can be cloned or shared between threads freely.
///
/// Task, project and history operations live in [`super::tasks`],
/// [`super::projects`] and [`super::history`].
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    options: StoreOptions,
    schema_state: SchemaState,
}

impl Store {
    /// Opens the store at `path` with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Opens (creating if necessary) the database file and brings its schema
    /// up to date. Failure here is fatal for the caller.
    ///
    /// # Arguments
    ///
    /// * `path` - Database file; missing parent directories are created
    /// * `options` - Defaults for new tasks and the mismatch policy
    ///
    /// # Errors
    ///
    /// [`StoreError::SchemaMismatch`] when the tables do not fit and the
    /// policy is [`MismatchPolicy::Fail`]; `Io` or `Sqlite` when the file
    /// cannot be opened, backed up or migrated.
    pub fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let _guard = INIT_LOCK.lock();

        let mut db = Db::open(&path)?;
        let schema_state = prepare_schema(&mut db.conn, &path, options.mismatch_policy)?;
        tracing::debug!(path = %path.display(), state = ?schema_state, "store ready");

        Ok(Self {
            path,
            options,
            schema_state,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Schema state found when the store was opened.
    pub fn schema_state(&self) -> SchemaState {
        self.schema_state
    }

    /// Runs `f` in a deferred (read) transaction.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&Transaction) -> Result<T, StoreError>) -> Result<T, StoreError> {
        self.session(TransactionBehavior::Deferred, f)
    }

    /// Runs `f` in an immediate transaction: the write lock is taken before
    /// `f` reads anything, so what it compares against is what it commits over.
    pub(crate) fn write<T>(&self, f: impl FnOnce(&Transaction) -> Result<T, StoreError>) -> Result<T, StoreError> {
        self.session(TransactionBehavior::Immediate, f)
    }

    fn session<T>(
        &self,
        behavior: TransactionBehavior,
        f: impl FnOnce(&Transaction) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut db = Db::open(&self.path)?;
        let tx = db.conn.transaction_with_behavior(behavior)?;
        // Dropping an uncommitted transaction rolls it back
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

/// Turns an operation's error into its documented fallback value.
pub(crate) fn absorb<T>(operation: &str, result: Result<T, StoreError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(operation, error = %e, "store operation failed");
            fallback
        }
    }
}
