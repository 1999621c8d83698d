use super::AppContext;
use crate::{
    libs::{config::DEFAULT_PROJECT, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct CleanupArgs {
    /// Project name to check instead of the built-in default project
    #[arg(long)]
    project: Option<String>,
}

pub fn cmd(ctx: &AppContext, args: CleanupArgs) -> Result<()> {
    let (name, cleaned) = match args.project {
        Some(name) => {
            let cleaned = ctx.store.delete_orphan_project_tasks(&name);
            (name, cleaned)
        }
        None => (DEFAULT_PROJECT.to_string(), ctx.store.delete_orphan_learning_tasks()),
    };

    if cleaned {
        msg_success!(Message::OrphanTasksRemoved(name));
    } else {
        msg_info!(Message::OrphanCleanupSkipped(name));
    }
    Ok(())
}
