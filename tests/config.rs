#[cfg(test)]
mod tests {
    use soulplanner::db::store::StoreOptions;
    use soulplanner::libs::config::{Config, BATCH_SIZE, DEFAULT_PROJECT};
    use soulplanner::libs::task::{TaskPriority, TaskStatus};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl ConfigTestContext {
        fn config_path(&self) -> PathBuf {
            self.temp_dir.path().join("config.json")
        }
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_project, DEFAULT_PROJECT);
        assert_eq!(config.batch_size, BATCH_SIZE);
        assert_eq!(config.default_status, TaskStatus::NotStarted);
        assert_eq!(config.default_priority, TaskPriority::Medium);
        assert!(config.database_path.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let config = Config {
            default_project: "work".to_string(),
            default_status: TaskStatus::WorkingOnIt,
            default_priority: TaskPriority::High,
            batch_size: 20,
            database_path: Some(ctx.temp_dir.path().join("other.db")),
        };
        config.save_to(&ctx.config_path()).unwrap();

        let read = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(read, config);
        assert_eq!(read.database_path().unwrap(), ctx.temp_dir.path().join("other.db"));

        let raw = fs::read_to_string(ctx.config_path()).unwrap();
        assert!(raw.contains("\"Working on it\""));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut ConfigTestContext) {
        fs::write(ctx.config_path(), r#"{"default_project": "home"}"#).unwrap();

        let config = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(config.default_project, "home");
        assert_eq!(config.batch_size, BATCH_SIZE);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        fs::write(ctx.config_path(), "{ not json").unwrap();
        assert!(Config::read_from(&ctx.config_path()).is_err());
    }

    #[test]
    fn test_store_options_follow_config() {
        let config = Config {
            default_project: "side".to_string(),
            batch_size: 5,
            ..Config::default()
        };
        let options = StoreOptions::from(&config);
        assert_eq!(options.default_project, "side");
        assert_eq!(options.batch_size, 5);
    }
}
