use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the current values without prompting
    #[arg(short, long)]
    yes: bool,
}

/// Prompts for the user-adjustable defaults and saves `config.json`.
pub fn cmd(init_args: InitArgs) -> Result<()> {
    let mut config = Config::read()?;

    if !init_args.yes {
        config.default_project = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDefaultProject.to_string())
            .default(config.default_project.clone())
            .interact_text()?;

        config.batch_size = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBatchSize.to_string())
            .default(config.batch_size)
            .validate_with(|size: &usize| if *size > 0 { Ok(()) } else { Err("must be at least 1") })
            .interact_text()?;
    }

    let path = config.save()?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));
    Ok(())
}
