use super::formatter::{format_date, truncate_text, DateStyle};
use super::history::TaskHistory;
use super::project::Project;
use super::task::{Task, TaskStatistics};
use anyhow::Result;
use prettytable::{row, Table};

const TITLE_WIDTH: usize = 40;

/// Terminal tables for the command layer.
///
/// Each function prints one table to stdout with prettytable. Dates are
/// rendered through [`format_date`], titles in listings are cut to a fixed
/// width, and absent optional fields show as empty cells.
pub struct View {}

impl View {
    /// One row per task: id, title, status, priority, relative due date,
    /// project and owner.
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "STATUS", "PRIORITY", "DUE", "PROJECT", "OWNER"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                truncate_text(&task.title, TITLE_WIDTH),
                task.status,
                task.priority,
                task.due_date.as_deref().map(|d| format_date(d, DateStyle::Relative)).unwrap_or_default(),
                task.project,
                task.owner.as_deref().unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// All fields of one task, one per row.
    pub fn task(task: &Task) -> Result<()> {
        let hours = |h: Option<f64>| h.map(|h| format!("{:.1}", h)).unwrap_or_default();
        let mut table = Table::new();

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["Title", task.title]);
        table.add_row(row!["Description", task.description.as_deref().unwrap_or_default()]);
        table.add_row(row!["Owner", task.owner.as_deref().unwrap_or_default()]);
        table.add_row(row!["Status", task.status]);
        table.add_row(row!["Priority", task.priority]);
        table.add_row(row!["Project", task.project]);
        table.add_row(row!["Due", task.due_date.as_deref().map(|d| format_date(d, DateStyle::Long)).unwrap_or_default()]);
        table.add_row(row!["Created", format_date(&task.created_date, DateStyle::Long)]);
        table.add_row(row!["Completed", task.completed_date.as_deref().unwrap_or_default()]);
        table.add_row(row!["Tags", task.tag_list().join(", ")]);
        table.add_row(row!["Estimated hours", hours(task.estimated_hours)]);
        table.add_row(row!["Actual hours", hours(task.actual_hours)]);
        table.add_row(row!["Notes", task.notes.as_deref().unwrap_or_default()]);
        table.printstd();

        Ok(())
    }

    /// Change rows as returned by `get_task_history`, newest first. Cleared
    /// values show as "-".
    pub fn history(rows: &[TaskHistory]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["CHANGED", "FIELD", "OLD", "NEW"]);
        for entry in rows {
            table.add_row(row![
                entry.changed_date,
                entry.field_name,
                entry.old_value.as_deref().unwrap_or("-"),
                entry.new_value.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn projects(projects: &[Project]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DESCRIPTION", "COLOR", "CREATED"]);
        for project in projects {
            table.add_row(row![
                project.id,
                project.name,
                project.description.as_deref().unwrap_or_default(),
                project.color.as_deref().unwrap_or_default(),
                format_date(&project.created_date, DateStyle::Short)
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Totals, per-status counts and the completion rate.
    ///
    /// # Arguments
    ///
    /// * `stats` - Figures from `Store::get_task_statistics`
    pub fn statistics(stats: &TaskStatistics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["Total", stats.total]);
        table.add_row(row!["Completed", stats.completed]);
        table.add_row(row!["Overdue", stats.overdue]);
        for (status, count) in &stats.status_counts {
            table.add_row(row![status, count]);
        }
        table.add_row(row!["Completion rate", format!("{:.1}%", stats.completion_rate)]);
        table.printstd();

        Ok(())
    }
}
