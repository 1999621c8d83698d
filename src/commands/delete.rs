use super::AppContext;
use crate::{libs::messages::Message, msg_error, msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(ctx: &AppContext, args: DeleteArgs) -> Result<()> {
    let Some(task) = ctx.store.get_task_by_id(args.id) else {
        msg_error!(Message::TaskNotFoundWithId(args.id));
        return Ok(());
    };

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if ctx.store.delete_task(args.id) {
        msg_success!(Message::TaskDeleted(args.id));
    } else {
        msg_error!(Message::TaskDeleteFailed(args.id));
    }

    Ok(())
}
