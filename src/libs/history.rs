use serde::{Deserialize, Serialize};

/// One recorded field change of a task.
///
/// Values are kept as text whatever the field's type; `None` stands for an
/// empty field. Rows are append-only and go away only with their task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistory {
    pub id: i64,
    pub task_id: i64,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`, local time.
    pub changed_date: String,
    pub changed_by: Option<String>,
}
