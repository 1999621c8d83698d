use super::AppContext;
use crate::{
    libs::{messages::Message, view::View},
    msg_error, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    id: i64,
}

pub fn cmd(ctx: &AppContext, args: ShowArgs) -> Result<()> {
    let Some(task) = ctx.store.get_task_by_id(args.id) else {
        msg_error!(Message::TaskNotFoundWithId(args.id));
        return Ok(());
    };
    View::task(&task)?;

    let history = ctx.store.get_task_history(task.id);
    if history.is_empty() {
        msg_info!(Message::NoHistoryForTask(task.id));
        return Ok(());
    }

    msg_print!(Message::TaskHistoryHeader(task.id), true);
    View::history(&history)
}
