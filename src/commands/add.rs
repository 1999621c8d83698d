use super::AppContext;
use crate::{
    libs::{messages::Message, validation::TaskForm},
    msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;

/// Task fields as typed on the command line; validated before anything is stored.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    title: String,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long)]
    owner: Option<String>,
    /// Not Started, Working on it, Stuck or Done
    #[arg(short, long)]
    status: Option<String>,
    /// Low, Medium, High or Urgent
    #[arg(short, long)]
    priority: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    due: Option<String>,
    #[arg(short, long)]
    notes: Option<String>,
    #[arg(long)]
    project: Option<String>,
    /// Comma-separated tags
    #[arg(short, long)]
    tags: Option<String>,
    /// Estimated effort in hours
    #[arg(short, long)]
    estimate: Option<String>,
    /// Hours already spent
    #[arg(long)]
    actual: Option<String>,
}

impl From<AddArgs> for TaskForm {
    fn from(args: AddArgs) -> Self {
        TaskForm {
            title: Some(args.title),
            description: args.description,
            owner: args.owner,
            status: args.status,
            priority: args.priority,
            due_date: args.due,
            notes: args.notes,
            project: args.project,
            tags: args.tags,
            estimated_hours: args.estimate,
            actual_hours: args.actual,
        }
    }
}

pub fn cmd(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let form = TaskForm::from(args);
    let task = match form.to_new_task() {
        Ok(task) => task,
        Err(report) => {
            msg_error!(Message::ValidationFailed(report.to_string()));
            return Ok(());
        }
    };

    match ctx.store.add_task(&task) {
        Some(id) => msg_success!(Message::TaskCreated(id)),
        None => msg_error!(Message::TaskCreateFailed),
    }

    Ok(())
}
