use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, inspect_schema, MigrationManager, SchemaState},
    },
    libs::messages::Message,
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

/// What `migrations status` reports for each schema state.
fn schema_message(state: SchemaState) -> Message {
    match state {
        SchemaState::Empty => Message::DatabaseEmpty,
        SchemaState::Outdated => Message::DatabaseNeedsUpdate,
        SchemaState::Current => Message::DatabaseUpToDate,
        SchemaState::Mismatched => Message::DatabaseSchemaUnreadable,
    }
}

/// Reads the schema bookkeeping without migrating anything.
pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let db = Db::new()?;

    match args.command {
        MigrationsCommand::Status => {
            let version = get_db_version(&db.conn)?;
            msg_print!(Message::DatabaseVersion(version));
            let state = inspect_schema(&db.conn)?;
            tracing::debug!(?state, "schema inspected");
            match state {
                SchemaState::Mismatched => msg_warning!(schema_message(state)),
                _ => msg_info!(schema_message(state)),
            }
        }
        MigrationsCommand::History => {
            let history = MigrationManager::new().get_migration_history(&db.conn)?;

            msg_print!(Message::MigrationHistory, true);
            for (version, name, applied_at) in history {
                println!("  v{}: {} (applied: {})", version, name, applied_at);
            }
        }
    }

    Ok(())
}
