use super::AppContext;
use crate::{
    libs::{messages::Message, view::View},
    msg_info,
};
use anyhow::Result;

pub fn cmd(ctx: &AppContext) -> Result<()> {
    let tasks = ctx.store.get_overdue_tasks();
    if tasks.is_empty() {
        msg_info!(Message::NoOverdueTasks);
        return Ok(());
    }

    View::tasks(&tasks)
}
