use super::AppContext;
use crate::{libs::messages::Message, msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    id: i64,
}

pub fn cmd(ctx: &AppContext, args: DoneArgs, completed: bool) -> Result<()> {
    if ctx.store.get_task_by_id(args.id).is_none() {
        msg_error!(Message::TaskNotFoundWithId(args.id));
        return Ok(());
    }

    if !ctx.store.set_completed(args.id, completed) {
        msg_error!(Message::TaskUpdateFailed(args.id));
    } else if completed {
        msg_success!(Message::TaskCompleted(args.id));
    } else {
        msg_success!(Message::TaskReopened(args.id));
    }

    Ok(())
}
