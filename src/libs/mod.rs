//! Domain types and support code shared by the store and the commands.
//!
//! ## Usage
//!
//! ```rust
//! use soulplanner::libs::validation::{validate_task, TaskForm};
//!
//! let report = validate_task(&TaskForm::titled("Read chapter 3"));
//! assert!(report.is_valid());
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod history;
pub mod messages;
pub mod project;
pub mod task;
pub mod validation;
pub mod view;
