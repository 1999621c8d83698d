//! Input validation for task and project forms.
//!
//! Every rule is checked independently so a single pass reports all the
//! problems with a form, in a fixed order. Validation never touches the
//! database.

use super::config::{
    MAX_DESCRIPTION_LENGTH, MAX_ESTIMATED_HOURS, MAX_NOTES_LENGTH, MAX_OWNER_LENGTH, MAX_PROJECT_NAME_LENGTH, MAX_TAGS_LENGTH,
    MAX_TITLE_LENGTH,
};
use super::formatter::parse_date;
use super::project::NewProject;
use super::task::{NewTask, Task, TaskPriority, TaskStatus};
use std::fmt;

/// Task fields as typed into a form. Every field is optional text; numbers
/// are parsed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub project: Option<String>,
    pub tags: Option<String>,
    pub estimated_hours: Option<String>,
    pub actual_hours: Option<String>,
}

impl TaskForm {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Validates the form and converts it into a [`NewTask`]; blank text
    /// fields become `None`.
    pub fn to_new_task(&self) -> Result<NewTask, ValidationReport> {
        let report = validate_task(self);
        if !report.is_valid() {
            return Err(report);
        }

        Ok(NewTask {
            title: self.title.as_deref().unwrap_or_default().trim().to_string(),
            description: non_blank(&self.description),
            owner: non_blank(&self.owner),
            status: non_blank(&self.status).and_then(|s| s.parse().ok()),
            priority: non_blank(&self.priority).and_then(|s| s.parse().ok()),
            due_date: non_blank(&self.due_date),
            notes: non_blank(&self.notes),
            project: non_blank(&self.project),
            tags: non_blank(&self.tags),
            estimated_hours: non_blank(&self.estimated_hours).and_then(|s| s.parse().ok()),
            actual_hours: non_blank(&self.actual_hours).and_then(|s| s.parse().ok()),
        })
    }
}

impl From<&Task> for TaskForm {
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: task.description.clone(),
            owner: task.owner.clone(),
            status: Some(task.status.label().to_string()),
            priority: Some(task.priority.label().to_string()),
            due_date: task.due_date.clone(),
            notes: task.notes.clone(),
            project: Some(task.project.clone()),
            tags: task.tags.clone(),
            estimated_hours: task.estimated_hours.map(|h| h.to_string()),
            actual_hours: task.actual_hours.map(|h| h.to_string()),
        }
    }
}

/// Trimmed text, or `None` when absent or blank.
pub fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    pub message: String,
}

/// Outcome of validating a form: valid when no rule was violated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        if !self.errors.iter().any(|e| e.message == message) {
            self.errors.push(ValidationError { field, message });
        }
    }
}

/// Renders one "• message" bullet per line.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.errors.iter().map(|e| format!("• {}", e.message)).collect();
        f.write_str(&lines.join("\n"))
    }
}

fn too_long(value: &Option<String>, max: usize) -> bool {
    value.as_deref().is_some_and(|v| v.trim().chars().count() > max)
}

/// Checks a task form against the field rules.
pub fn validate_task(form: &TaskForm) -> ValidationReport {
    let mut report = ValidationReport::default();

    let title = form.title.as_deref().unwrap_or_default().trim();
    if title.is_empty() {
        report.push("title", "Task title is required");
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        report.push("title", format!("Task title must be {} characters or less", MAX_TITLE_LENGTH));
    }

    if let Some(due_date) = non_blank(&form.due_date) {
        if parse_date(&due_date).is_none() {
            report.push("due_date", "Invalid due date format. Use YYYY-MM-DD (e.g., 2024-12-31)");
        }
    }

    if too_long(&form.owner, MAX_OWNER_LENGTH) {
        report.push("owner", format!("Owner name must be {} characters or less", MAX_OWNER_LENGTH));
    }

    if let Some(hours) = non_blank(&form.estimated_hours) {
        check_hours(&mut report, "estimated_hours", "Estimated hours", &hours, Some(MAX_ESTIMATED_HOURS));
    }

    if too_long(&form.notes, MAX_NOTES_LENGTH) {
        report.push("notes", format!("Notes must be {} characters or less", MAX_NOTES_LENGTH));
    }

    if too_long(&form.tags, MAX_TAGS_LENGTH) {
        report.push("tags", format!("Tags must be {} characters or less", MAX_TAGS_LENGTH));
    }

    if too_long(&form.description, MAX_DESCRIPTION_LENGTH) {
        report.push("description", format!("Description must be {} characters or less", MAX_DESCRIPTION_LENGTH));
    }

    if let Some(status) = non_blank(&form.status) {
        if status.parse::<TaskStatus>().is_err() {
            report.push("status", format!("Unknown status '{}'", status));
        }
    }

    if let Some(priority) = non_blank(&form.priority) {
        if priority.parse::<TaskPriority>().is_err() {
            report.push("priority", format!("Unknown priority '{}'", priority));
        }
    }

    if too_long(&form.project, MAX_PROJECT_NAME_LENGTH) {
        report.push("project", format!("Project name must be {} characters or less", MAX_PROJECT_NAME_LENGTH));
    }

    if let Some(hours) = non_blank(&form.actual_hours) {
        check_hours(&mut report, "actual_hours", "Actual hours", &hours, None);
    }

    report
}

/// Each failure mode (not a number, negative, too large) has its own message.
fn check_hours(report: &mut ValidationReport, field: &'static str, label: &str, value: &str, max: Option<f64>) {
    match value.parse::<f64>() {
        Ok(hours) if !hours.is_finite() => report.push(field, format!("{} must be a valid number", label)),
        Ok(hours) if hours < 0.0 => report.push(field, format!("{} must be a positive number", label)),
        Ok(hours) if max.is_some_and(|max| hours > max) => {
            report.push(field, format!("{} must be {} or less", label, max.unwrap_or_default()))
        }
        Ok(_) => {}
        Err(_) => report.push(field, format!("{} must be a valid number", label)),
    }
}

/// Checks a new project: name required and short enough, color `#RRGGBB`.
pub fn validate_project(project: &NewProject) -> ValidationReport {
    let mut report = ValidationReport::default();

    let name = project.name.trim();
    if name.is_empty() {
        report.push("name", "Project name is required");
    } else if name.chars().count() > MAX_PROJECT_NAME_LENGTH {
        report.push("name", format!("Project name must be {} characters or less", MAX_PROJECT_NAME_LENGTH));
    }

    if let Some(color) = non_blank(&project.color) {
        if !is_hex_color(&color) {
            report.push("color", "Color must be a hex value like #2563eb");
        }
    }

    report
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7 && value.starts_with('#') && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
