use super::AppContext;
use crate::{
    libs::{
        messages::Message,
        task::TaskPatch,
        validation::{non_blank, validate_task, TaskForm},
    },
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

/// Only the given options change. An empty value ("") clears an optional field.
#[derive(Debug, Args)]
pub struct EditArgs {
    id: i64,
    #[arg(long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long)]
    owner: Option<String>,
    #[arg(short, long)]
    status: Option<String>,
    #[arg(short, long)]
    priority: Option<String>,
    #[arg(long)]
    due: Option<String>,
    #[arg(short, long)]
    notes: Option<String>,
    #[arg(long)]
    project: Option<String>,
    #[arg(short, long)]
    tags: Option<String>,
    #[arg(short, long)]
    estimate: Option<String>,
    #[arg(long)]
    actual: Option<String>,
}

/// `Some(None)` for a blank value, so the field is cleared.
fn clearable(value: &Option<String>) -> Option<Option<String>> {
    value.as_ref().map(|_| non_blank(value))
}

fn clearable_hours(value: &Option<String>) -> Option<Option<f64>> {
    clearable(value).map(|hours| hours.and_then(|h| h.parse().ok()))
}

impl EditArgs {
    /// The stored task's form with the given options laid over it.
    fn merged_form(&self, mut form: TaskForm) -> TaskForm {
        let overlay = |slot: &mut Option<String>, value: &Option<String>| {
            if value.is_some() {
                *slot = value.clone();
            }
        };
        overlay(&mut form.title, &self.title);
        overlay(&mut form.description, &self.description);
        overlay(&mut form.owner, &self.owner);
        overlay(&mut form.status, &self.status);
        overlay(&mut form.priority, &self.priority);
        overlay(&mut form.due_date, &self.due);
        overlay(&mut form.notes, &self.notes);
        overlay(&mut form.project, &self.project);
        overlay(&mut form.tags, &self.tags);
        overlay(&mut form.estimated_hours, &self.estimate);
        overlay(&mut form.actual_hours, &self.actual);
        form
    }

    /// Call after validation: every given value is known to parse.
    fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: self.title.as_deref().map(|t| t.trim().to_string()),
            description: clearable(&self.description),
            owner: clearable(&self.owner),
            status: non_blank(&self.status).and_then(|s| s.parse().ok()),
            priority: non_blank(&self.priority).and_then(|s| s.parse().ok()),
            due_date: clearable(&self.due),
            notes: clearable(&self.notes),
            project: non_blank(&self.project),
            tags: clearable(&self.tags),
            estimated_hours: clearable_hours(&self.estimate),
            actual_hours: clearable_hours(&self.actual),
        }
    }
}

pub fn cmd(ctx: &AppContext, args: EditArgs) -> Result<()> {
    let Some(task) = ctx.store.get_task_by_id(args.id) else {
        msg_error!(Message::TaskNotFoundWithId(args.id));
        return Ok(());
    };

    let report = validate_task(&args.merged_form(TaskForm::from(&task)));
    if !report.is_valid() {
        msg_error!(Message::ValidationFailed(report.to_string()));
        return Ok(());
    }

    let patch = args.patch();
    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    if ctx.store.update_task(args.id, &patch) {
        msg_success!(Message::TaskUpdated(args.id));
    } else {
        msg_error!(Message::TaskUpdateFailed(args.id));
    }

    Ok(())
}
