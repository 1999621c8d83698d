#[cfg(test)]
mod tests {
    use soulplanner::libs::project::NewProject;
    use soulplanner::libs::task::{TaskPriority, TaskStatus};
    use soulplanner::libs::validation::{validate_project, validate_task, TaskForm};

    fn form_with_hours(hours: &str) -> TaskForm {
        TaskForm {
            estimated_hours: Some(hours.to_string()),
            ..TaskForm::titled("Plan sprint")
        }
    }

    #[test]
    fn test_missing_title_is_rejected() {
        for title in [None, Some(""), Some("   \t ")] {
            let form = TaskForm {
                title: title.map(str::to_string),
                ..TaskForm::default()
            };
            let report = validate_task(&form);
            assert!(!report.is_valid());
            assert!(report.has_error_for("title"));
            assert_eq!(report.messages(), vec!["Task title is required"]);
        }
    }

    #[test]
    fn test_title_length_limit() {
        assert!(validate_task(&TaskForm::titled(&"a".repeat(100))).is_valid());

        let report = validate_task(&TaskForm::titled(&"a".repeat(101)));
        assert_eq!(report.messages(), vec!["Task title must be 100 characters or less"]);
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let form = TaskForm {
            due_date: Some("2024-12-31".to_string()),
            status: Some("Working on it".to_string()),
            priority: Some("urgent".to_string()),
            estimated_hours: Some("2.5".to_string()),
            ..TaskForm::titled("Write report")
        };
        let report = validate_task(&form);
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_due_date_format() {
        for bad in ["31/12/2024", "2024-13-01", "tomorrow"] {
            let form = TaskForm {
                due_date: Some(bad.to_string()),
                ..TaskForm::titled("Ship")
            };
            let report = validate_task(&form);
            assert_eq!(report.messages(), vec!["Invalid due date format. Use YYYY-MM-DD (e.g., 2024-12-31)"]);
        }

        let blank = TaskForm {
            due_date: Some("  ".to_string()),
            ..TaskForm::titled("Ship")
        };
        assert!(validate_task(&blank).is_valid());
    }

    #[test]
    fn test_estimated_hours_messages_are_distinct() {
        let negative = validate_task(&form_with_hours("-1")).messages().join("");
        let too_large = validate_task(&form_with_hours("1001")).messages().join("");
        let not_number = validate_task(&form_with_hours("abc")).messages().join("");

        assert_eq!(negative, "Estimated hours must be a positive number");
        assert_eq!(too_large, "Estimated hours must be 1000 or less");
        assert_eq!(not_number, "Estimated hours must be a valid number");

        assert!(validate_task(&form_with_hours("0")).is_valid());
        assert!(validate_task(&form_with_hours("1000")).is_valid());
    }

    #[test]
    fn test_all_errors_reported_in_order() {
        let form = TaskForm {
            title: None,
            due_date: Some("soon".to_string()),
            owner: Some("o".repeat(51)),
            estimated_hours: Some("-3".to_string()),
            notes: Some("n".repeat(1001)),
            tags: Some("t".repeat(201)),
            description: Some("d".repeat(501)),
            ..TaskForm::default()
        };
        let report = validate_task(&form);
        let fields: Vec<&str> = report.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "due_date", "owner", "estimated_hours", "notes", "tags", "description"]);
    }

    #[test]
    fn test_report_renders_bullets() {
        let form = TaskForm {
            estimated_hours: Some("abc".to_string()),
            ..TaskForm::default()
        };
        assert_eq!(
            validate_task(&form).to_string(),
            "• Task title is required\n• Estimated hours must be a valid number"
        );
    }

    #[test]
    fn test_unknown_status_and_priority() {
        let form = TaskForm {
            status: Some("Finished".to_string()),
            priority: Some("Critical".to_string()),
            ..TaskForm::titled("Check")
        };
        let report = validate_task(&form);
        assert!(report.has_error_for("status"));
        assert!(report.has_error_for("priority"));
    }

    #[test]
    fn test_form_converts_to_new_task() {
        let form = TaskForm {
            title: Some("  Read book  ".to_string()),
            owner: Some("".to_string()),
            status: Some("done".to_string()),
            priority: Some("High".to_string()),
            estimated_hours: Some("4".to_string()),
            ..TaskForm::default()
        };
        let task = form.to_new_task().unwrap();
        assert_eq!(task.title, "Read book");
        assert_eq!(task.owner, None);
        assert_eq!(task.status, Some(TaskStatus::Done));
        assert_eq!(task.priority, Some(TaskPriority::High));
        assert_eq!(task.estimated_hours, Some(4.0));
        assert_eq!(task.project, None);

        assert!(TaskForm::default().to_new_task().is_err());
    }

    #[test]
    fn test_project_validation() {
        assert!(validate_project(&NewProject::new("Home")).is_valid());

        let report = validate_project(&NewProject::new("  "));
        assert_eq!(report.messages(), vec!["Project name is required"]);

        let long = validate_project(&NewProject::new(&"p".repeat(51)));
        assert!(long.has_error_for("name"));

        let colored = NewProject {
            color: Some("blue".to_string()),
            ..NewProject::new("Work")
        };
        assert!(validate_project(&colored).has_error_for("color"));

        let hex = NewProject {
            color: Some("#A1b2C3".to_string()),
            ..NewProject::new("Work")
        };
        assert!(validate_project(&hex).is_valid());
    }
}
