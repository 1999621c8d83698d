use super::AppContext;
use crate::{
    libs::{
        messages::Message,
        task::{TaskFilter, TaskStatus},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    project: Option<String>,
    #[arg(short, long)]
    status: Option<TaskStatus>,
    #[arg(short, long)]
    owner: Option<String>,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,
}

pub fn cmd(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let page = args.page.max(1);
    let batch_size = ctx.store.options().batch_size;
    let filter = TaskFilter {
        project: args.project,
        status: args.status,
        owner: args.owner,
        limit: batch_size,
        offset: (page - 1) * batch_size,
    };

    let tasks = ctx.store.get_tasks(&filter);
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TasksPage { page, shown: tasks.len() }, true);
    View::tasks(&tasks)
}
