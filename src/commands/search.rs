use super::AppContext;
use crate::{
    libs::{messages::Message, view::View},
    msg_info,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for; matching is case-sensitive
    term: String,
    #[arg(long)]
    project: Option<String>,
}

pub fn cmd(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let tasks = ctx.store.search_tasks(&args.term, args.project.as_deref());
    if tasks.is_empty() {
        msg_info!(Message::NoSearchResults(args.term));
        return Ok(());
    }

    View::tasks(&tasks)
}
