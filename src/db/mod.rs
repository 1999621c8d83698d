//! Persistence layer for soulplanner.
//!
//! Everything lives in one SQLite file with three tables (`task`, `project`,
//! `taskhistory`) plus the `migrations` bookkeeping table. Callers work
//! through a [`store::Store`], which owns the path and defaults; the entity
//! modules add their operations to it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use soulplanner::db::store::Store;
//! use soulplanner::libs::task::{NewTask, TaskFilter, TaskPatch};
//!
//! let store = Store::open("tasks.db")?;
//! let id = store.add_task(&NewTask::new("Read chapter 3")).unwrap_or_default();
//! store.update_task(id, &TaskPatch { title: Some("Read chapter 4".into()), ..Default::default() });
//! for task in store.get_tasks(&TaskFilter::project("learning")) {
//!     println!("{} {}", task.id, task.title);
//! }
//! # Ok::<(), soulplanner::libs::error::StoreError>(())
//! ```

/// Connection opening and pragmas.
pub mod db;

/// Versioned schema migrations, schema inspection and the rebuild path.
pub mod migrations;

/// The `Store` handle, its transaction helpers and error boundary.
pub mod store;

/// Read-side normalization of loosely typed column values.
mod coerce;

/// Task CRUD, search, statistics and orphan cleanup.
pub mod tasks;

/// Project creation, listing, archiving and permanent deletion.
pub mod projects;

/// Task change history.
pub mod history;
