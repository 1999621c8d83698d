/// Every user-facing text the application prints.
///
/// Commands and the store never format strings for the terminal directly;
/// they pick a variant and hand it to one of the `msg_*` macros, which
/// decide between stdout and `tracing`. The wording lives in the `Display`
/// impl in `display.rs`.
///
/// # Example
///
/// ```rust
/// use soulplanner::libs::messages::Message;
///
/// assert_eq!(Message::DatabaseUpToDate.to_string(), "Database is up to date");
/// ```
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskCreateFailed,
    TaskUpdated(i64),
    TaskUpdateFailed(i64),
    TaskDeleted(i64),
    TaskDeleteFailed(i64),
    TaskNotFoundWithId(i64),
    TaskCompleted(i64),
    TaskReopened(i64),
    NoChangesDetected,
    NoTasksFound,
    NoSearchResults(String),
    NoOverdueTasks,
    TasksPage { page: usize, shown: usize },
    TaskHistoryHeader(i64),
    NoHistoryForTask(i64),
    ConfirmDeleteTask(String),
    ValidationFailed(String),

    // === PROJECT MESSAGES ===
    ProjectCreated(String),
    ProjectCreateFailed(String),
    ProjectArchived(String),
    ProjectPurged(String),
    ProjectNotFound(String),
    NoProjectsFound,
    ConfirmPurgeProject(String),
    OrphanTasksRemoved(String),
    OrphanCleanupSkipped(String),

    // === STATISTICS MESSAGES ===
    StatisticsHeader(Option<String>),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String),
    PromptDefaultProject,
    PromptBatchSize,

    // === DATABASE MESSAGES ===
    DatabaseCreated(String),
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    DatabaseEmpty,
    DatabaseSchemaUnreadable,
    MigrationHistory,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    SchemaMismatchDetected(String),
    SchemaBackupCreated(String),
    SchemaBackupExists(String),
    SchemaRebuilt,

    // === GENERAL ===
    OperationCancelled,
}
