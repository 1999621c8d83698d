//! # Soulplanner
//!
//! A personal task planner: tasks grouped into projects, with validation of
//! user input and a local SQLite store that keeps a per-field change history.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use soulplanner::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
