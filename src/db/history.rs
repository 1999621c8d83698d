//! Task history: the append-only audit trail written by `update_task`.

use super::coerce;
use super::migrations::{HISTORY_COLUMNS, HISTORY_TABLE};
use super::store::{absorb, Store};
use crate::libs::config::DATETIME_FORMAT;
use crate::libs::error::StoreError;
use crate::libs::history::TaskHistory;
use crate::libs::task::FieldChange;
use chrono::Local;
use rusqlite::{params, Connection, Row};

const INSERT_HISTORY: &str = "INSERT INTO taskhistory (task_id, field_name, old_value, new_value, changed_date, changed_by) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

fn history_from_row(row: &Row) -> rusqlite::Result<TaskHistory> {
    Ok(TaskHistory {
        id: row.get(0)?,
        task_id: row.get(1)?,
        field_name: coerce::required_text(row, 2)?,
        old_value: coerce::text(row, 3)?,
        new_value: coerce::text(row, 4)?,
        changed_date: coerce::required_text(row, 5)?,
        changed_by: coerce::text(row, 6)?,
    })
}

/// Appends one row per change, all stamped with the same time.
pub(crate) fn record_changes(conn: &Connection, task_id: i64, changes: &[FieldChange]) -> Result<(), StoreError> {
    let changed_date = Local::now().format(DATETIME_FORMAT).to_string();
    let mut stmt = conn.prepare(INSERT_HISTORY)?;
    for change in changes {
        stmt.execute(params![
            task_id,
            change.field,
            change.old_value,
            change.new_value,
            changed_date,
            None::<String>
        ])?;
    }
    Ok(())
}

pub(crate) fn delete_history_for(conn: &Connection, task_id: i64) -> Result<usize, StoreError> {
    Ok(conn.execute("DELETE FROM taskhistory WHERE task_id = ?1", params![task_id])?)
}

impl Store {
    /// History rows of one task, newest first.
    pub fn get_task_history(&self, task_id: i64) -> Vec<TaskHistory> {
        absorb("get_task_history", self.try_get_task_history(task_id), Vec::new())
    }

    fn try_get_task_history(&self, task_id: i64) -> Result<Vec<TaskHistory>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE task_id = ?1 ORDER BY changed_date DESC, id DESC",
            HISTORY_COLUMNS, HISTORY_TABLE
        );
        self.read(|tx| {
            let mut stmt = tx.prepare(&sql)?;
            let rows = stmt.query_map(params![task_id], history_from_row)?.collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}
