mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands};
use commands::page::PageArgs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    for key in veil_rules::integrity_report() {
        log::warn!("[Startup] 类别 {} 的匹配器不可用，已跳过", key);
    }

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };

    match cli.command {
        Commands::Text {
            file,
            redaction,
            report,
            verify,
        } => {
            let app = config::load_config(&config_path)?;
            let redaction = redaction.resolve(&app)?;
            commands::text::handle(
                file.as_deref(),
                &redaction,
                report,
                verify || app.verify.unwrap_or(false),
            )
        }
        Commands::Page {
            layout,
            image,
            out,
            redaction,
            report,
            verify,
        } => {
            let app = config::load_config(&config_path)?;
            let redaction = redaction.resolve(&app)?;
            let args = PageArgs {
                layout: &layout,
                image: image.as_deref(),
                out: out.as_deref(),
                report,
                verify: verify || app.verify.unwrap_or(false),
            };
            commands::page::handle(args, &redaction, &app.paint_options())
        }
        Commands::Categories => {
            commands::categories::handle();
            Ok(())
        }
        Commands::Config(ConfigCommands::Show) => commands::config::show(&config_path),
        Commands::Config(ConfigCommands::Init { force }) => commands::config::init(&config_path, force),
    }
}
