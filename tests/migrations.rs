#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use soulplanner::db::db::Db;
    use soulplanner::db::migrations::{
        backup_path, get_db_version, inspect_schema, needs_migration, MigrationManager, MismatchPolicy, SchemaState,
    };
    use soulplanner::db::store::{Store, StoreOptions};
    use soulplanner::libs::error::StoreError;
    use soulplanner::libs::task::{NewTask, TaskFilter, TaskPriority, TaskStatus};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("tasks.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                path,
            }
        }
    }

    fn write_legacy_schema(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE task (id INTEGER PRIMARY KEY, title TEXT NOT NULL, description TEXT, owner TEXT,
                status TEXT, priority TEXT, due_date TEXT, created_date TEXT, completed_date TEXT, notes TEXT,
                completed BOOLEAN, project TEXT, tags TEXT, estimated_hours REAL, actual_hours REAL);
             CREATE TABLE project (id INTEGER PRIMARY KEY, name TEXT, description TEXT, created_date TEXT,
                is_active BOOLEAN, color TEXT);
             CREATE TABLE taskhistory (id INTEGER PRIMARY KEY, task_id INTEGER, field_name TEXT, old_value TEXT,
                new_value TEXT, changed_date TEXT, changed_by TEXT);
             INSERT INTO task (title, status, priority, due_date, created_date, completed, project, estimated_hours)
                VALUES ('Legacy', 'Working on it', 'High', 20240105, '2024-01-01', 0, 'learning', '3.5');",
        )
        .unwrap();
    }

    fn write_mismatched_schema(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE task (id INTEGER PRIMARY KEY, name TEXT, done INTEGER);
             INSERT INTO task (name, done) VALUES ('old style', 0);",
        )
        .unwrap();
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_new_database_is_created(ctx: &mut MigrationTestContext) {
        let store = Store::open(&ctx.path).unwrap();
        assert_eq!(store.schema_state(), SchemaState::Empty);
        assert!(ctx.path.exists());

        let db = Db::open(&ctx.path).unwrap();
        assert_eq!(get_db_version(&db.conn).unwrap(), MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());
        assert_eq!(inspect_schema(&db.conn).unwrap(), SchemaState::Current);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_reopen_is_current(ctx: &mut MigrationTestContext) {
        let store = Store::open(&ctx.path).unwrap();
        let id = store.add_task(&NewTask::new("Persisted")).unwrap();

        let reopened = Store::open(&ctx.path).unwrap();
        assert_eq!(reopened.schema_state(), SchemaState::Current);
        assert_eq!(reopened.get_task_by_id(id).unwrap().title, "Persisted");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        Store::open(&ctx.path).unwrap();
        let db = Db::open(&ctx.path).unwrap();

        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        assert!(!history.is_empty());
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_are_idempotent(ctx: &mut MigrationTestContext) {
        let mut db = Db::open(&ctx.path).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut db.conn).unwrap();
        manager.run_migrations(&mut db.conn).unwrap();

        let history = manager.get_migration_history(&db.conn).unwrap();
        assert_eq!(history.len() as u32, manager.latest_version());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_unversioned_database_is_adopted(ctx: &mut MigrationTestContext) {
        write_legacy_schema(&ctx.path);

        let store = Store::open(&ctx.path).unwrap();
        assert_eq!(store.schema_state(), SchemaState::Outdated);
        assert!(!backup_path(&ctx.path).exists());

        let tasks = store.get_tasks(&TaskFilter::default());
        assert_eq!(tasks.len(), 1);
        // Loosely typed legacy values come back normalized
        assert_eq!(tasks[0].due_date.as_deref(), Some("20240105"));
        assert_eq!(tasks[0].estimated_hours, Some(3.5));
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_legacy_labels_are_canonicalized(ctx: &mut MigrationTestContext) {
        write_legacy_schema(&ctx.path);
        let conn = Connection::open(&ctx.path).unwrap();
        conn.execute_batch(
            "INSERT INTO task (title, status, priority, created_date, completed, project)
                VALUES ('Shouting', 'WORKING_ON_IT', 'HIGH', '2024-01-02', 0, 'learning');
             INSERT INTO task (title, status, priority, created_date, completed, project)
                VALUES ('Blank', NULL, '  ', '2024-01-03', 0, 'learning');
             INSERT INTO task (title, status, priority, created_date, completed, project)
                VALUES ('Finished', 'done', 'low', '2024-01-04', 1, 'learning');",
        )
        .unwrap();
        drop(conn);

        let store = Store::open(&ctx.path).unwrap();
        assert_eq!(store.schema_state(), SchemaState::Outdated);

        let working = store.get_tasks(&TaskFilter {
            status: Some(TaskStatus::WorkingOnIt),
            ..TaskFilter::default()
        });
        let mut titles: Vec<_> = working.iter().map(|t| t.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["Legacy", "Shouting"]);
        assert!(working.iter().all(|t| t.priority == TaskPriority::High));

        let blank = store.get_tasks(&TaskFilter {
            status: Some(TaskStatus::NotStarted),
            ..TaskFilter::default()
        });
        assert_eq!(blank.len(), 1);
        assert_eq!(blank[0].priority, TaskPriority::Medium);

        let done = store.get_tasks(&TaskFilter {
            status: Some(TaskStatus::Done),
            ..TaskFilter::default()
        });
        assert_eq!(done.len(), 1);

        let stats = store.get_task_statistics(None);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.status_counts[&TaskStatus::WorkingOnIt], working.len());

        let conn = Connection::open(&ctx.path).unwrap();
        let stored: String = conn
            .query_row("SELECT status FROM task WHERE title = 'Shouting'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, "Working on it");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_mismatched_schema_is_rebuilt_with_backup(ctx: &mut MigrationTestContext) {
        write_mismatched_schema(&ctx.path);

        let store = Store::open(&ctx.path).unwrap();
        assert_eq!(store.schema_state(), SchemaState::Mismatched);

        let backup = backup_path(&ctx.path);
        assert_eq!(backup.file_name().unwrap(), "tasks.db.backup");
        assert!(backup.exists());
        let old = Connection::open(&backup).unwrap();
        let name: String = old.query_row("SELECT name FROM task", [], |row| row.get(0)).unwrap();
        assert_eq!(name, "old style");

        assert!(store.get_tasks(&TaskFilter::default()).is_empty());
        let id = store.add_task(&NewTask::new("Fresh")).unwrap();
        assert_eq!(store.get_task_by_id(id).unwrap().title, "Fresh");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_existing_backup_is_not_overwritten(ctx: &mut MigrationTestContext) {
        write_mismatched_schema(&ctx.path);
        let backup = backup_path(&ctx.path);
        fs::write(&backup, b"earlier backup").unwrap();

        Store::open(&ctx.path).unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"earlier backup");
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fail_policy_leaves_file_alone(ctx: &mut MigrationTestContext) {
        write_mismatched_schema(&ctx.path);
        let options = StoreOptions {
            mismatch_policy: MismatchPolicy::Fail,
            ..StoreOptions::default()
        };

        let result = Store::open_with(&ctx.path, options);
        assert!(matches!(result, Err(StoreError::SchemaMismatch { .. })));
        assert!(!backup_path(&ctx.path).exists());

        let conn = Connection::open(&ctx.path).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM task", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_fails_for_unusable_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        assert!(Store::open(blocker.join("tasks.db")).is_err());
    }
}
