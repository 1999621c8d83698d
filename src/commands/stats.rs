use super::AppContext;
use crate::{
    libs::{messages::Message, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Limit the counts to one project
    #[arg(long)]
    project: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn cmd(ctx: &AppContext, args: StatsArgs) -> Result<()> {
    let stats = ctx.store.get_task_statistics(args.project.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    msg_print!(Message::StatisticsHeader(args.project), true);
    View::statistics(&stats)
}
