//! Project operations on the [`Store`].

use super::coerce;
use super::migrations::{PROJECT_COLUMNS, PROJECT_TABLE};
use super::store::{absorb, Store};
use super::tasks::delete_tasks_where;
use crate::libs::config::DATE_FORMAT;
use crate::libs::error::StoreError;
use crate::libs::formatter::today;
use crate::libs::project::{NewProject, Project};
use rusqlite::{params, Row};

fn project_from_row(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: coerce::required_text(row, 1)?,
        description: coerce::text(row, 2)?,
        created_date: coerce::required_text(row, 3)?,
        is_active: coerce::flag(row, 4)?,
        color: coerce::text(row, 5)?,
    })
}

impl Store {
    /// Creates an active project and returns its id. Names are not unique.
    pub fn add_project(&self, project: &NewProject) -> Option<i64> {
        absorb("add_project", self.try_add_project(project).map(Some), None)
    }

    fn try_add_project(&self, project: &NewProject) -> Result<i64, StoreError> {
        let created_date = today().format(DATE_FORMAT).to_string();
        let id = self.write(|tx| {
            tx.execute(
                "INSERT INTO project (name, description, created_date, is_active, color) VALUES (?1, ?2, ?3, 1, ?4)",
                params![project.name, project.description, created_date, project.color],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        tracing::info!(project_id = id, name = %project.name, "project added");
        Ok(id)
    }

    /// Active projects in creation order.
    pub fn get_projects(&self) -> Vec<Project> {
        absorb("get_projects", self.try_get_projects(), Vec::new())
    }

    fn try_get_projects(&self) -> Result<Vec<Project>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE is_active = 1 ORDER BY id", PROJECT_COLUMNS, PROJECT_TABLE);
        self.read(|tx| {
            let mut stmt = tx.prepare(&sql)?;
            let projects = stmt.query_map([], project_from_row)?.collect::<Result<Vec<_>, _>>()?;
            Ok(projects)
        })
    }

    /// Archives every project called `name`. Its tasks are kept.
    pub fn delete_project(&self, name: &str) -> bool {
        absorb("delete_project", self.try_delete_project(name), false)
    }

    fn try_delete_project(&self, name: &str) -> Result<bool, StoreError> {
        let archived = self.write(|tx| Ok(tx.execute("UPDATE project SET is_active = 0 WHERE name = ?1", params![name])?))?;
        if archived > 0 {
            tracing::info!(name, "project archived");
        }
        Ok(archived > 0)
    }

    /// Deletes every task filed under `name` (with its history), then the
    /// project rows called `name`.
    ///
    /// Tasks are removed even when no project row exists, so this also
    /// clears tasks left behind by a project that is already gone.
    /// Archived projects count as existing.
    ///
    /// # Returns
    ///
    /// `true` when at least one project row was deleted; `false` when none
    /// matched or the operation failed.
    pub fn delete_project_permanently(&self, name: &str) -> bool {
        absorb("delete_project_permanently", self.try_delete_project_permanently(name), false)
    }

    fn try_delete_project_permanently(&self, name: &str) -> Result<bool, StoreError> {
        let (tasks, projects) = self.write(|tx| {
            let tasks = delete_tasks_where(tx, "project = ?1", name)?;
            let projects = tx.execute("DELETE FROM project WHERE name = ?1", params![name])?;
            Ok((tasks, projects))
        })?;

        tracing::info!(name, tasks, projects, "project deleted permanently");
        Ok(projects > 0)
    }
}
