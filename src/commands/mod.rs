//! Terminal front-end: one clap subcommand per module.
//!
//! Commands that touch tasks or projects receive an [`AppContext`] holding
//! the loaded configuration and an opened [`Store`]; `init` and
//! `migrations` work without one.

pub mod add;
pub mod cleanup;
pub mod delete;
pub mod done;
pub mod edit;
pub mod init;
pub mod list;
pub mod migrations;
pub mod overdue;
pub mod project;
pub mod search;
pub mod show;
pub mod stats;

use crate::db::store::{Store, StoreOptions};
use crate::libs::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Write the configuration file")]
    Init(init::InitArgs),
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "List tasks, newest first")]
    List(list::ListArgs),
    #[command(about = "Search titles, descriptions and notes")]
    Search(search::SearchArgs),
    #[command(about = "Show a task and its change history")]
    Show(show::ShowArgs),
    #[command(about = "Change fields of a task")]
    Edit(edit::EditArgs),
    #[command(about = "Mark a task as done")]
    Done(done::DoneArgs),
    #[command(about = "Move a done task back to 'Working on it'")]
    Undone(done::DoneArgs),
    #[command(about = "Delete a task and its history")]
    Delete(delete::DeleteArgs),
    #[command(about = "Show task statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "List overdue tasks")]
    Overdue,
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Delete tasks left in a project that no longer exists")]
    Cleanup(cleanup::CleanupArgs),
    #[command(about = "Database schema version and migration history")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Configuration and store shared by the commands of one invocation.
pub struct AppContext {
    pub config: Config,
    pub store: Store,
}

impl AppContext {
    /// Reads the configuration and opens the configured database.
    pub fn load() -> Result<Self> {
        let config = Config::read()?;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let path = config.database_path()?;
        let store = Store::open_with(&path, StoreOptions::from(&config))?;
        Ok(Self { config, store })
    }
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
            command => {
                let ctx = AppContext::load()?;
                match command {
                    Commands::Add(args) => add::cmd(&ctx, args),
                    Commands::List(args) => list::cmd(&ctx, args),
                    Commands::Search(args) => search::cmd(&ctx, args),
                    Commands::Show(args) => show::cmd(&ctx, args),
                    Commands::Edit(args) => edit::cmd(&ctx, args),
                    Commands::Done(args) => done::cmd(&ctx, args, true),
                    Commands::Undone(args) => done::cmd(&ctx, args, false),
                    Commands::Delete(args) => delete::cmd(&ctx, args),
                    Commands::Stats(args) => stats::cmd(&ctx, args),
                    Commands::Overdue => overdue::cmd(&ctx),
                    Commands::Project(args) => project::cmd(&ctx, args),
                    Commands::Cleanup(args) => cleanup::cmd(&ctx, args),
                    Commands::Init(_) | Commands::Migrations(_) => Ok(()),
                }
            }
        }
    }
}
