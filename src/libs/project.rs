use serde::{Deserialize, Serialize};

/// A named grouping of tasks.
///
/// Tasks refer to a project by `name` only; nothing enforces that the
/// project row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_date: String,
    /// False once the project has been archived (soft-deleted).
    pub is_active: bool,
    /// Display color as `#RRGGBB`.
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl NewProject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}
