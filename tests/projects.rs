#[cfg(test)]
mod tests {
    use soulplanner::db::store::Store;
    use soulplanner::libs::project::NewProject;
    use soulplanner::libs::task::{NewTask, TaskFilter, TaskPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ProjectTestContext {
        _temp_dir: TempDir,
        store: Store,
    }

    impl TestContext for ProjectTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = Store::open(temp_dir.path().join("tasks.db")).unwrap();
            ProjectTestContext {
                _temp_dir: temp_dir,
                store,
            }
        }
    }

    fn add_task(store: &Store, title: &str, project: &str) -> i64 {
        let task = NewTask {
            project: Some(project.to_string()),
            ..NewTask::new(title)
        };
        store.add_task(&task).unwrap()
    }

    fn project_names(store: &Store) -> Vec<String> {
        store.get_projects().into_iter().map(|p| p.name).collect()
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_add_and_list_projects(ctx: &mut ProjectTestContext) {
        let project = NewProject {
            description: Some("Day job".to_string()),
            color: Some("#ff0000".to_string()),
            ..NewProject::new("Work")
        };
        let id = ctx.store.add_project(&project).unwrap();
        ctx.store.add_project(&NewProject::new("Home")).unwrap();

        let projects = ctx.store.get_projects();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, id);
        assert_eq!(projects[0].name, "Work");
        assert_eq!(projects[0].description.as_deref(), Some("Day job"));
        assert_eq!(projects[0].color.as_deref(), Some("#ff0000"));
        assert!(projects[0].is_active);
        assert_eq!(projects[1].name, "Home");
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_archive_hides_project_keeps_tasks(ctx: &mut ProjectTestContext) {
        ctx.store.add_project(&NewProject::new("Garden")).unwrap();
        add_task(&ctx.store, "Plant", "Garden");

        assert!(ctx.store.delete_project("Garden"));
        assert!(project_names(&ctx.store).is_empty());
        assert_eq!(ctx.store.get_tasks(&TaskFilter::project("Garden")).len(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_archive_missing_project(ctx: &mut ProjectTestContext) {
        assert!(!ctx.store.delete_project("Nowhere"));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_delete_project_permanently(ctx: &mut ProjectTestContext) {
        ctx.store.add_project(&NewProject::new("X")).unwrap();
        ctx.store.add_project(&NewProject::new("Y")).unwrap();
        let first = add_task(&ctx.store, "One", "X");
        add_task(&ctx.store, "Two", "X");
        add_task(&ctx.store, "Other", "Y");

        let patch = TaskPatch {
            title: Some("One, renamed".to_string()),
            ..TaskPatch::default()
        };
        assert!(ctx.store.update_task(first, &patch));
        assert_eq!(ctx.store.get_task_history(first).len(), 1);

        assert!(ctx.store.delete_project_permanently("X"));
        assert!(ctx.store.get_tasks(&TaskFilter::project("X")).is_empty());
        assert_eq!(project_names(&ctx.store), vec!["Y"]);
        assert!(ctx.store.get_task_history(first).is_empty());
        assert_eq!(ctx.store.get_tasks(&TaskFilter::project("Y")).len(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_delete_permanently_missing_project_clears_its_tasks(ctx: &mut ProjectTestContext) {
        let stray = add_task(&ctx.store, "Stray", "Ghost");
        add_task(&ctx.store, "Also stray", "Ghost");
        add_task(&ctx.store, "Elsewhere", "Home");
        let patch = TaskPatch {
            title: Some("Stray, renamed".to_string()),
            ..TaskPatch::default()
        };
        assert!(ctx.store.update_task(stray, &patch));

        // No project row, so false, but the tasks and their history still go
        assert!(!ctx.store.delete_project_permanently("Ghost"));
        assert!(ctx.store.get_tasks(&TaskFilter::project("Ghost")).is_empty());
        assert!(ctx.store.get_task_history(stray).is_empty());
        assert_eq!(ctx.store.get_tasks(&TaskFilter::project("Home")).len(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_delete_permanently_unknown_name(ctx: &mut ProjectTestContext) {
        add_task(&ctx.store, "Kept", "Home");

        assert!(!ctx.store.delete_project_permanently("Nowhere"));
        assert_eq!(ctx.store.get_tasks(&TaskFilter::default()).len(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_delete_permanently_archived_project(ctx: &mut ProjectTestContext) {
        ctx.store.add_project(&NewProject::new("Old")).unwrap();
        add_task(&ctx.store, "Leftover", "Old");
        assert!(ctx.store.delete_project("Old"));

        assert!(ctx.store.delete_project_permanently("Old"));
        assert!(ctx.store.get_tasks(&TaskFilter::project("Old")).is_empty());
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_orphan_cleanup_for_named_project(ctx: &mut ProjectTestContext) {
        add_task(&ctx.store, "Orphan", "Side");
        add_task(&ctx.store, "Kept", "Main");
        ctx.store.add_project(&NewProject::new("Main")).unwrap();

        assert!(ctx.store.delete_orphan_project_tasks("side"));
        assert!(!ctx.store.delete_orphan_project_tasks("Main"));
        let titles: Vec<String> = ctx.store.get_tasks(&TaskFilter::default()).into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Kept"]);
    }
}
