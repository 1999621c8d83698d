use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task #{} created", id),
            Message::TaskCreateFailed => "Failed to create task".to_string(),
            Message::TaskUpdated(id) => format!("Task #{} updated", id),
            Message::TaskUpdateFailed(id) => format!("Failed to update task #{}", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskDeleteFailed(id) => format!("Failed to delete task #{}", id),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TaskCompleted(id) => format!("Task #{} marked as done", id),
            Message::TaskReopened(id) => format!("Task #{} is back in progress", id),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::NoSearchResults(term) => format!("No tasks match '{}'.", term),
            Message::NoOverdueTasks => "Nothing is overdue.".to_string(),
            Message::TasksPage { page, shown } => format!("Page {} ({} task(s))", page, shown),
            Message::TaskHistoryHeader(id) => format!("Change history of task #{}", id),
            Message::NoHistoryForTask(id) => format!("Task #{} has no recorded changes.", id),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}' and its history?", title),
            Message::ValidationFailed(report) => format!("Please fix the following:\n{}", report),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(name) => format!("Project '{}' created", name),
            Message::ProjectCreateFailed(name) => format!("Failed to create project '{}'", name),
            Message::ProjectArchived(name) => format!("Project '{}' archived; its tasks are kept", name),
            Message::ProjectPurged(name) => format!("Project '{}' and all its tasks deleted", name),
            Message::ProjectNotFound(name) => format!("Project '{}' not found.", name),
            Message::NoProjectsFound => "No active projects.".to_string(),
            Message::ConfirmPurgeProject(name) => {
                format!("Permanently delete project '{}' and every task in it? This cannot be undone.", name)
            }
            Message::OrphanTasksRemoved(name) => format!("Removed tasks left in the missing '{}' project", name),
            Message::OrphanCleanupSkipped(name) => format!("Project '{}' exists; nothing to clean up.", name),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader(Some(project)) => format!("Statistics for '{}'", project),
            Message::StatisticsHeader(None) => "Statistics for all projects".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::PromptDefaultProject => "Default project".to_string(),
            Message::PromptBatchSize => "Tasks per page".to_string(),

            // === DATABASE MESSAGES ===
            Message::DatabaseCreated(path) => format!("Created new database at {}", path),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::DatabaseEmpty => "Database has no tables yet; they are created on first use".to_string(),
            Message::DatabaseSchemaUnreadable => {
                "Database tables do not match the current schema; next use backs the file up and rebuilds it".to_string()
            }
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::SchemaMismatchDetected(path) => {
                format!("Database at {} has an outdated schema; it will be rebuilt and existing data dropped", path)
            }
            Message::SchemaBackupCreated(path) => format!("Backed up old database to {}", path),
            Message::SchemaBackupExists(path) => format!("Backup {} already exists; keeping it", path),
            Message::SchemaRebuilt => "Dropped old schema and created a fresh one".to_string(),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
