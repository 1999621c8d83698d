//! Task operations on the [`Store`].

use super::coerce;
use super::history::{delete_history_for, record_changes};
use super::migrations::{TASK_COLUMNS, TASK_TABLE};
use super::store::{absorb, Store};
use crate::libs::config::{DATE_FORMAT, DEFAULT_PROJECT};
use crate::libs::error::StoreError;
use crate::libs::formatter::today;
use crate::libs::task::{NewTask, Task, TaskFilter, TaskPatch, TaskStatistics, TaskStatus};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const INSERT_TASK: &str = "INSERT INTO task (title, description, owner, status, priority, due_date, created_date, \
     completed_date, notes, completed, project, tags, estimated_hours, actual_hours) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const UPDATE_TASK: &str = "UPDATE task SET title = ?2, description = ?3, owner = ?4, status = ?5, priority = ?6, \
     due_date = ?7, completed_date = ?8, notes = ?9, completed = ?10, project = ?11, tags = ?12, \
     estimated_hours = ?13, actual_hours = ?14 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM task WHERE id = ?1";
const NEWEST_FIRST: &str = "ORDER BY created_date DESC, id DESC";

fn select_tasks() -> String {
    format!("SELECT {} FROM {}", TASK_COLUMNS, TASK_TABLE)
}

/// Maps a row selected with `TASK_COLUMNS`.
fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    let status = coerce::required_text(row, 4)?;
    let priority = coerce::required_text(row, 5)?;

    Ok(Task {
        id: row.get(0)?,
        title: coerce::required_text(row, 1)?,
        description: coerce::text(row, 2)?,
        owner: coerce::text(row, 3)?,
        status: status.parse().map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
        priority: priority.parse().map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?,
        due_date: coerce::text(row, 6)?,
        created_date: coerce::required_text(row, 7)?,
        completed_date: coerce::text(row, 8)?,
        notes: coerce::text(row, 9)?,
        completed: coerce::flag(row, 10)?,
        project: coerce::required_text(row, 11)?,
        tags: coerce::text(row, 12)?,
        estimated_hours: coerce::real(row, 13)?,
        actual_hours: coerce::real(row, 14)?,
    })
}

fn query_tasks(conn: &Connection, sql: &str, params: &[Value]) -> Result<Vec<Task>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let tasks = stmt.query_map(params_from_iter(params.iter()), task_from_row)?.collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub(crate) fn fetch_task(conn: &Connection, id: i64) -> Result<Option<Task>, StoreError> {
    let sql = format!("{} WHERE id = ?1", select_tasks());
    Ok(conn.query_row(&sql, params![id], task_from_row).optional()?)
}

/// Deletes the given tasks together with their history rows.
pub(crate) fn delete_tasks_where(conn: &Connection, condition: &str, value: &str) -> Result<usize, StoreError> {
    let mut stmt = conn.prepare(&format!("SELECT id FROM task WHERE {}", condition))?;
    let ids = stmt.query_map(params![value], |row| row.get::<_, i64>(0))?.collect::<Result<Vec<_>, _>>()?;
    for id in &ids {
        delete_history_for(conn, *id)?;
        conn.execute(DELETE_TASK, params![id])?;
    }
    Ok(ids.len())
}

/// Empty filter values count as "no filter".
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Store {
    /// Creates a task and returns its id. Unset status, priority and project
    /// take the store defaults; a task created as Done is stamped completed today.
    pub fn add_task(&self, task: &NewTask) -> Option<i64> {
        absorb("add_task", self.try_add_task(task).map(Some), None)
    }

    fn try_add_task(&self, task: &NewTask) -> Result<i64, StoreError> {
        let options = self.options();
        let status = task.status.unwrap_or(options.default_status);
        let priority = task.priority.unwrap_or(options.default_priority);
        let project = task.project.clone().unwrap_or_else(|| options.default_project.clone());
        let created_date = today().format(DATE_FORMAT).to_string();
        let completed = status.is_done();
        let completed_date = completed.then(|| created_date.clone());

        let id = self.write(|tx| {
            tx.execute(
                INSERT_TASK,
                params![
                    task.title,
                    task.description,
                    task.owner,
                    status.label(),
                    priority.label(),
                    task.due_date,
                    created_date,
                    completed_date,
                    task.notes,
                    completed,
                    project,
                    task.tags,
                    task.estimated_hours,
                    task.actual_hours,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        tracing::info!(task_id = id, "task added");
        Ok(id)
    }

    /// Tasks matching `filter`, newest first, one page at a time.
    pub fn get_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        absorb("get_tasks", self.try_get_tasks(filter), Vec::new())
    }

    fn try_get_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let mut clauses = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(project) = non_empty(&filter.project) {
            values.push(Value::Text(project.to_string()));
            clauses.push(format!("project = ?{}", values.len()));
        }
        if let Some(status) = filter.status {
            values.push(Value::Text(status.label().to_string()));
            clauses.push(format!("status = ?{}", values.len()));
        }
        if let Some(owner) = non_empty(&filter.owner) {
            values.push(Value::Text(owner.to_string()));
            clauses.push(format!("owner = ?{}", values.len()));
        }

        let mut sql = select_tasks();
        if !clauses.is_empty() {
            sql.push_str(&format!(" WHERE {}", clauses.join(" AND ")));
        }
        values.push(Value::Integer(filter.limit as i64));
        values.push(Value::Integer(filter.offset as i64));
        sql.push_str(&format!(" {} LIMIT ?{} OFFSET ?{}", NEWEST_FIRST, values.len() - 1, values.len()));

        self.read(|tx| query_tasks(tx, &sql, &values))
    }

    /// Tasks whose title, description or notes contain `term`
    /// (case-sensitive), newest first.
    pub fn search_tasks(&self, term: &str, project: Option<&str>) -> Vec<Task> {
        absorb("search_tasks", self.try_search_tasks(term, project), Vec::new())
    }

    fn try_search_tasks(&self, term: &str, project: Option<&str>) -> Result<Vec<Task>, StoreError> {
        // instr() is case-sensitive, unlike LIKE
        let mut sql = format!(
            "{} WHERE (instr(title, ?1) > 0 OR instr(COALESCE(description, ''), ?1) > 0 OR instr(COALESCE(notes, ''), ?1) > 0)",
            select_tasks()
        );
        let mut values = vec![Value::Text(term.to_string())];
        if let Some(project) = project.filter(|p| !p.is_empty()) {
            sql.push_str(" AND project = ?2");
            values.push(Value::Text(project.to_string()));
        }
        sql.push_str(&format!(" {}", NEWEST_FIRST));

        self.read(|tx| query_tasks(tx, &sql, &values))
    }

    /// The task with `id`, or `None` when it does not exist or cannot be read.
    pub fn get_task_by_id(&self, id: i64) -> Option<Task> {
        absorb("get_task_by_id", self.read(|tx| fetch_task(tx, id)), None)
    }

    /// Applies `patch` to the task and records one history row per field
    /// that changed, comparing against the stored values inside the same
    /// write transaction. Returns false when the task does not exist.
    pub fn update_task(&self, id: i64, patch: &TaskPatch) -> bool {
        absorb("update_task", self.try_update_task(id, patch), false)
    }

    fn try_update_task(&self, id: i64, patch: &TaskPatch) -> Result<bool, StoreError> {
        let changes = self.write(|tx| {
            let Some(mut task) = fetch_task(tx, id)? else {
                return Ok(None);
            };
            let changes = task.apply(patch, today());
            if !changes.is_empty() {
                tx.execute(
                    UPDATE_TASK,
                    params![
                        task.id,
                        task.title,
                        task.description,
                        task.owner,
                        task.status.label(),
                        task.priority.label(),
                        task.due_date,
                        task.completed_date,
                        task.notes,
                        task.completed,
                        task.project,
                        task.tags,
                        task.estimated_hours,
                        task.actual_hours,
                    ],
                )?;
                record_changes(tx, id, &changes)?;
            }
            Ok(Some(changes))
        })?;

        match changes {
            None => Ok(false),
            Some(changes) => {
                if !changes.is_empty() {
                    let fields: Vec<&str> = changes.iter().map(|c| c.field).collect();
                    tracing::info!(task_id = id, fields = %fields.join(", "), "task updated");
                }
                Ok(true)
            }
        }
    }

    /// Marks the task Done, or moves it back to "Working on it".
    pub fn set_completed(&self, id: i64, completed: bool) -> bool {
        let status = if completed { TaskStatus::Done } else { TaskStatus::WorkingOnIt };
        self.update_task(
            id,
            &TaskPatch {
                status: Some(status),
                ..TaskPatch::default()
            },
        )
    }

    /// Deletes the task's history, then the task. False if it does not exist.
    pub fn delete_task(&self, id: i64) -> bool {
        absorb("delete_task", self.try_delete_task(id), false)
    }

    fn try_delete_task(&self, id: i64) -> Result<bool, StoreError> {
        let deleted = self.write(|tx| {
            let exists: Option<i64> = tx.query_row("SELECT id FROM task WHERE id = ?1", params![id], |row| row.get(0)).optional()?;
            if exists.is_none() {
                return Ok(false);
            }
            delete_history_for(tx, id)?;
            tx.execute(DELETE_TASK, params![id])?;
            Ok(true)
        })?;

        if deleted {
            tracing::info!(task_id = id, "task deleted");
        }
        Ok(deleted)
    }

    /// Counts over all tasks, or over one project's tasks.
    pub fn get_task_statistics(&self, project: Option<&str>) -> TaskStatistics {
        absorb("get_task_statistics", self.try_get_task_statistics(project), TaskStatistics::default())
    }

    fn try_get_task_statistics(&self, project: Option<&str>) -> Result<TaskStatistics, StoreError> {
        let tasks = self.read(|tx| match project.filter(|p| !p.is_empty()) {
            Some(project) => query_tasks(tx, &format!("{} WHERE project = ?1", select_tasks()), &[Value::Text(project.to_string())]),
            None => query_tasks(tx, &select_tasks(), &[]),
        })?;
        Ok(TaskStatistics::from_tasks(&tasks, today()))
    }

    /// Open tasks whose due date is before today, most overdue first.
    pub fn get_overdue_tasks(&self) -> Vec<Task> {
        absorb("get_overdue_tasks", self.try_get_overdue_tasks(), Vec::new())
    }

    fn try_get_overdue_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let sql = format!("{} WHERE completed = 0 AND due_date IS NOT NULL ORDER BY due_date ASC, id ASC", select_tasks());
        let candidates = self.read(|tx| query_tasks(tx, &sql, &[]))?;
        let today = today();
        Ok(candidates.into_iter().filter(|task| task.is_overdue(today)).collect())
    }

    /// If no project named "learning" (any case) exists, deletes every task
    /// filed under that name. Returns whether the cleanup ran.
    pub fn delete_orphan_learning_tasks(&self) -> bool {
        self.delete_orphan_project_tasks(DEFAULT_PROJECT)
    }

    /// Deletes the tasks (and their history) of `project` when no project
    /// row with that name exists, comparing names case-insensitively.
    pub fn delete_orphan_project_tasks(&self, project: &str) -> bool {
        absorb("delete_orphan_project_tasks", self.try_delete_orphan_project_tasks(project), false)
    }

    fn try_delete_orphan_project_tasks(&self, project: &str) -> Result<bool, StoreError> {
        let removed = self.write(|tx| {
            let exists: Option<i64> = tx
                .query_row("SELECT id FROM project WHERE lower(name) = lower(?1) LIMIT 1", params![project], |row| row.get(0))
                .optional()?;
            if exists.is_some() {
                return Ok(None);
            }
            Ok(Some(delete_tasks_where(tx, "lower(project) = lower(?1)", project)?))
        })?;

        match removed {
            Some(count) => {
                tracing::info!(project, removed = count, "orphan tasks deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
