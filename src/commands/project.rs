use super::AppContext;
use crate::{
    libs::{config::DEFAULT_PROJECT_COLOR, messages::Message, project::NewProject, validation::validate_project, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: Option<ProjectCommand>,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// List active projects
    List,
    /// Create a project
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Display color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Archive a project, keeping its tasks
    Archive { name: String },
    /// Delete a project with all of its tasks
    Purge {
        name: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(ctx: &AppContext, args: ProjectArgs) -> Result<()> {
    match args.command {
        Some(ProjectCommand::Add { name, description, color }) => handle_add(ctx, name, description, color),
        Some(ProjectCommand::Archive { name }) => handle_archive(ctx, name),
        Some(ProjectCommand::Purge { name, yes }) => handle_purge(ctx, name, yes),
        Some(ProjectCommand::List) | None => handle_list(ctx),
    }
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let projects = ctx.store.get_projects();
    if projects.is_empty() {
        msg_info!(Message::NoProjectsFound);
        return Ok(());
    }

    View::projects(&projects)
}

fn handle_add(ctx: &AppContext, name: String, description: Option<String>, color: Option<String>) -> Result<()> {
    let project = NewProject {
        name: name.trim().to_string(),
        description,
        color: color.or_else(|| Some(DEFAULT_PROJECT_COLOR.to_string())),
    };

    let report = validate_project(&project);
    if !report.is_valid() {
        msg_error!(Message::ValidationFailed(report.to_string()));
        return Ok(());
    }

    match ctx.store.add_project(&project) {
        Some(_) => msg_success!(Message::ProjectCreated(project.name)),
        None => msg_error!(Message::ProjectCreateFailed(project.name)),
    }
    Ok(())
}

fn handle_archive(ctx: &AppContext, name: String) -> Result<()> {
    if ctx.store.delete_project(&name) {
        msg_success!(Message::ProjectArchived(name));
    } else {
        msg_error!(Message::ProjectNotFound(name));
    }
    Ok(())
}

fn handle_purge(ctx: &AppContext, name: String, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmPurgeProject(name.clone()).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_print!(Message::OperationCancelled);
        return Ok(());
    }

    if ctx.store.delete_project_permanently(&name) {
        msg_success!(Message::ProjectPurged(name));
    } else {
        msg_error!(Message::ProjectNotFound(name));
    }
    Ok(())
}
