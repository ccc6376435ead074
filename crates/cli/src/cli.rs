use crate::config::AppConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use veil_core::{parse_enabled, Locale, MoneyMode, RedactionConfig};

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Redact personal data from text and rendered pages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact a text file (or stdin) and print the result
    Text {
        /// Input .txt/.md file; reads stdin when omitted
        file: Option<PathBuf>,

        #[command(flatten)]
        redaction: RedactionArgs,

        /// Print hit counts and the risk report as JSON to stderr
        #[arg(long)]
        report: bool,

        /// Re-scan the output and fail on residual matches
        #[arg(long)]
        verify: bool,
    },

    /// Compute cover rectangles for one page layout
    Page {
        /// Page layout JSON ({width, height, fragments})
        layout: PathBuf,

        /// Rendered page image to paint over
        #[arg(long, requires = "out")]
        image: Option<PathBuf>,

        /// Where to write the painted image
        #[arg(long, requires = "image")]
        out: Option<PathBuf>,

        #[command(flatten)]
        redaction: RedactionArgs,

        /// Print hit counts and the risk report as JSON to stderr
        #[arg(long)]
        report: bool,

        /// Check that every match is covered by the rectangles
        #[arg(long)]
        verify: bool,
    },

    /// List detectable categories in priority order
    Categories,

    /// Manage the persisted configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a config file with every field filled in
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// 命令行覆盖项，优先于配置文件
#[derive(Args, Debug, Clone, Default)]
pub struct RedactionArgs {
    /// Comma separated categories, e.g. email,phone,bank
    #[arg(long)]
    pub enable: Option<String>,

    /// Money handling: off, exact or range
    #[arg(long)]
    pub money: Option<MoneyMode>,

    /// Placeholder language: en or zh
    #[arg(long)]
    pub locale: Option<Locale>,
}

impl RedactionArgs {
    pub fn resolve(&self, base: &AppConfig) -> anyhow::Result<RedactionConfig> {
        let mut config = base.redaction_config();
        if let Some(list) = &self.enable {
            config.enabled = parse_enabled(list)?;
        }
        if let Some(money) = self.money {
            config.money = money;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        Ok(config)
    }
}
