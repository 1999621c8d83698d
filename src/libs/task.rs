//! Task domain types.
//!
//! Status and priority are closed enumerations; their human-readable labels
//! ("Not Started", "Working on it", ...) are only used at the storage and
//! display edges. Change tracking lives here as a pure function
//! ([`Task::apply`]) so the store only has to persist what it reports.

use super::config::{BATCH_SIZE, DATE_FORMAT};
use super::error::ParseLabelError;
use super::formatter::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Folds a label to a comparable key: lowercase, with spaces, dashes and
/// underscores removed. Lets "Not Started", "not-started" and "NOT_STARTED"
/// all name the same status.
fn label_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "Working on it")]
    WorkingOnIt,
    #[serde(rename = "Stuck")]
    Stuck,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [TaskStatus::NotStarted, TaskStatus::WorkingOnIt, TaskStatus::Stuck, TaskStatus::Done];

    /// Canonical label, as stored in the database.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::WorkingOnIt => "Working on it",
            TaskStatus::Stuck => "Stuck",
            TaskStatus::Done => "Done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = label_key(value);
        TaskStatus::ALL
            .into_iter()
            .find(|status| label_key(status.label()) == key || (key == "working" && *status == TaskStatus::WorkingOnIt))
            .ok_or_else(|| ParseLabelError::new("status", value))
    }
}

/// Importance of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High, TaskPriority::Urgent];

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = label_key(value);
        TaskPriority::ALL
            .into_iter()
            .find(|priority| label_key(priority.label()) == key)
            .ok_or_else(|| ParseLabelError::new("priority", value))
    }
}

/// A persisted task.
///
/// `completed` is true exactly when `status` is [`TaskStatus::Done`], and
/// `completed_date` is set exactly when `completed` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: Option<String>,
    pub created_date: String,
    pub completed_date: Option<String>,
    pub notes: Option<String>,
    pub completed: bool,
    pub project: String,
    /// Comma-separated tags.
    pub tags: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
}

impl Task {
    /// Splits the comma-separated tag string into trimmed, non-empty tags.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Overdue means due strictly before `today` and not completed.
    /// An unparseable due date is never overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        if self.completed {
            return false;
        }
        self.due_date.as_deref().and_then(parse_date).is_some_and(|due| due < today)
    }

    /// Applies `patch` in place and returns one [`FieldChange`] per field
    /// whose value actually changed.
    ///
    /// Slots left unset in the patch are not touched. A status change also
    /// keeps `completed` and `completed_date` in step with the new status;
    /// each of those that flips is reported as its own change.
    pub fn apply(&mut self, patch: &TaskPatch, today: NaiveDate) -> Vec<FieldChange> {
        let mut changes = Vec::new();

        if let Some(title) = &patch.title {
            set_field(&mut changes, "title", &mut self.title, title.clone());
        }
        if let Some(description) = &patch.description {
            set_field(&mut changes, "description", &mut self.description, description.clone());
        }
        if let Some(owner) = &patch.owner {
            set_field(&mut changes, "owner", &mut self.owner, owner.clone());
        }
        if let Some(status) = patch.status {
            if set_field(&mut changes, "status", &mut self.status, status) {
                let done = status.is_done();
                set_field(&mut changes, "completed", &mut self.completed, done);
                let completed_date = if done {
                    self.completed_date.clone().or_else(|| Some(today.format(DATE_FORMAT).to_string()))
                } else {
                    None
                };
                set_field(&mut changes, "completed_date", &mut self.completed_date, completed_date);
            }
        }
        if let Some(priority) = patch.priority {
            set_field(&mut changes, "priority", &mut self.priority, priority);
        }
        if let Some(due_date) = &patch.due_date {
            set_field(&mut changes, "due_date", &mut self.due_date, due_date.clone());
        }
        if let Some(notes) = &patch.notes {
            set_field(&mut changes, "notes", &mut self.notes, notes.clone());
        }
        if let Some(project) = &patch.project {
            set_field(&mut changes, "project", &mut self.project, project.clone());
        }
        if let Some(tags) = &patch.tags {
            set_field(&mut changes, "tags", &mut self.tags, tags.clone());
        }
        if let Some(hours) = patch.estimated_hours {
            set_field(&mut changes, "estimated_hours", &mut self.estimated_hours, hours);
        }
        if let Some(hours) = patch.actual_hours {
            set_field(&mut changes, "actual_hours", &mut self.actual_hours, hours);
        }

        changes
    }
}

/// Writes `new` into `slot` when it differs and records the change.
/// Returns whether the slot changed.
fn set_field<T>(changes: &mut Vec<FieldChange>, field: &'static str, slot: &mut T, new: T) -> bool
where
    T: PartialEq + HistoryText,
{
    if *slot == new {
        return false;
    }
    changes.push(FieldChange {
        field,
        old_value: slot.history_text(),
        new_value: new.history_text(),
    });
    *slot = new;
    true
}

/// Text form of a field value as written to the change history.
pub trait HistoryText {
    fn history_text(&self) -> Option<String>;
}

impl HistoryText for String {
    fn history_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl HistoryText for bool {
    fn history_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl HistoryText for TaskStatus {
    fn history_text(&self) -> Option<String> {
        Some(self.label().to_string())
    }
}

impl HistoryText for TaskPriority {
    fn history_text(&self) -> Option<String> {
        Some(self.label().to_string())
    }
}

impl HistoryText for f64 {
    fn history_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: HistoryText> HistoryText for Option<T> {
    fn history_text(&self) -> Option<String> {
        self.as_ref().and_then(HistoryText::history_text)
    }
}

/// One field-level change produced by [`Task::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Input for creating a task. Unset status, priority and project take the
/// store's configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub project: Option<String>,
    pub tags: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// Partial update of a task: one optional slot per updatable field.
///
/// Nullable fields are `Option<Option<_>>`: `Some(None)` clears the field,
/// `None` leaves it alone. `completed` and `completed_date` have no slot;
/// they follow `status`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub owner: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub project: Option<String>,
    pub tags: Option<Option<String>>,
    pub estimated_hours: Option<Option<f64>>,
    pub actual_hours: Option<Option<f64>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Filters and paging for task listings.
///
/// All set filters must match. `limit` and `offset` page through the
/// result in the listing order, newest task first.
///
/// # Example
///
/// ```rust
/// use soulplanner::libs::task::{TaskFilter, TaskStatus};
///
/// let stuck_at_work = TaskFilter {
///     status: Some(TaskStatus::Stuck),
///     ..TaskFilter::project("work")
/// };
/// assert_eq!(stuck_at_work.project.as_deref(), Some("work"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFilter {
    pub project: Option<String>,
    pub status: Option<TaskStatus>,
    pub owner: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            project: None,
            status: None,
            owner: None,
            limit: BATCH_SIZE,
            offset: 0,
        }
    }
}

impl TaskFilter {
    pub fn project(name: &str) -> Self {
        Self {
            project: Some(name.to_string()),
            ..Self::default()
        }
    }
}

/// Aggregate counts over a set of tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    pub status_counts: BTreeMap<TaskStatus, usize>,
    /// Percentage of completed tasks, 0 when there are none.
    pub completion_rate: f64,
}

impl TaskStatistics {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let overdue = tasks.iter().filter(|task| task.is_overdue(today)).count();

        let mut status_counts: BTreeMap<TaskStatus, usize> = TaskStatus::ALL.into_iter().map(|status| (status, 0)).collect();
        for task in tasks {
            *status_counts.entry(task.status).or_default() += 1;
        }

        let completion_rate = if total > 0 { completed as f64 / total as f64 * 100.0 } else { 0.0 };

        Self {
            total,
            completed,
            overdue,
            status_counts,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn sample() -> Task {
        Task {
            id: 7,
            title: "Write report".to_string(),
            description: None,
            owner: Some("ana".to_string()),
            status: TaskStatus::NotStarted,
            priority: TaskPriority::Medium,
            due_date: Some("2024-03-01".to_string()),
            created_date: "2024-02-01".to_string(),
            completed_date: None,
            notes: None,
            completed: false,
            project: "learning".to_string(),
            tags: Some("work, urgent,,".to_string()),
            estimated_hours: Some(2.5),
            actual_hours: None,
        }
    }

    #[test]
    fn status_labels_parse_loosely() {
        assert_eq!("Not Started".parse::<TaskStatus>().unwrap(), TaskStatus::NotStarted);
        assert_eq!("NOT_STARTED".parse::<TaskStatus>().unwrap(), TaskStatus::NotStarted);
        assert_eq!("working".parse::<TaskStatus>().unwrap(), TaskStatus::WorkingOnIt);
        assert_eq!("working-on-it".parse::<TaskStatus>().unwrap(), TaskStatus::WorkingOnIt);
        assert!("finished".parse::<TaskStatus>().is_err());
        assert_eq!("URGENT".parse::<TaskPriority>().unwrap(), TaskPriority::Urgent);
        assert!("critical".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn tag_list_skips_blanks() {
        assert_eq!(sample().tag_list(), vec!["work", "urgent"]);
    }

    #[test]
    fn apply_same_value_records_nothing() {
        let mut task = sample();
        let patch = TaskPatch {
            title: Some("Write report".to_string()),
            owner: Some(Some("ana".to_string())),
            ..TaskPatch::default()
        };
        assert!(task.apply(&patch, day("2024-03-02")).is_empty());
    }

    #[test]
    fn apply_records_old_and_new_text() {
        let mut task = sample();
        let patch = TaskPatch {
            title: Some("X".to_string()),
            estimated_hours: Some(None),
            ..TaskPatch::default()
        };
        let changes = task.apply(&patch, day("2024-03-02"));
        assert_eq!(
            changes,
            vec![
                FieldChange {
                    field: "title",
                    old_value: Some("Write report".to_string()),
                    new_value: Some("X".to_string()),
                },
                FieldChange {
                    field: "estimated_hours",
                    old_value: Some("2.5".to_string()),
                    new_value: None,
                },
            ]
        );
        assert_eq!(task.title, "X");
        assert_eq!(task.estimated_hours, None);
    }

    #[test]
    fn status_drives_completion() {
        let mut task = sample();
        let done = TaskPatch {
            status: Some(TaskStatus::Done),
            ..TaskPatch::default()
        };
        let changes = task.apply(&done, day("2024-03-02"));
        let fields: Vec<_> = changes.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["status", "completed", "completed_date"]);
        assert!(task.completed);
        assert_eq!(task.completed_date.as_deref(), Some("2024-03-02"));

        let reopen = TaskPatch {
            status: Some(TaskStatus::Stuck),
            ..TaskPatch::default()
        };
        task.apply(&reopen, day("2024-03-05"));
        assert!(!task.completed);
        assert_eq!(task.completed_date, None);

        // moving between two open states leaves completion alone
        let changes = task.apply(
            &TaskPatch {
                status: Some(TaskStatus::WorkingOnIt),
                ..TaskPatch::default()
            },
            day("2024-03-06"),
        );
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn overdue_needs_past_date_and_open_task() {
        let mut task = sample();
        assert!(task.is_overdue(day("2024-03-02")));
        assert!(!task.is_overdue(day("2024-03-01")));
        task.completed = true;
        assert!(!task.is_overdue(day("2024-03-02")));
        task.completed = false;
        task.due_date = Some("someday".to_string());
        assert!(!task.is_overdue(day("2024-03-02")));
    }

    #[test]
    fn statistics_of_empty_set_are_zero() {
        let stats = TaskStatistics::from_tasks(&[], day("2024-03-02"));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.status_counts.values().sum::<usize>(), 0);
        assert_eq!(stats.status_counts.len(), 4);
    }
}
