//! # CLI Argument Definitions

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use recap::features::report::Language;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "recap")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Weekly market intelligence reports from the command line")]
pub(crate) struct Cli {
    /// Log progress at info level instead of warnings only.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AppCommands {
    /// Generate a report and write every available export
    Generate(GenerateArgs),
    /// Check that the provider API keys are configured
    Check {
        /// TOML file holding API keys (defaults to the configured secrets file)
        #[arg(long)]
        secrets: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    /// First day of the period, YYYY-MM-DD (default: a week before --end)
    #[arg(long)]
    pub(crate) start: Option<NaiveDate>,

    /// Last day of the period, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub(crate) end: Option<NaiveDate>,

    /// Report language, e.g. 'English' or 'Simplified Chinese'
    #[arg(short, long, default_value_t = Language::English)]
    pub(crate) language: Language,

    /// Number of news articles to analyze (50-300)
    #[arg(long)]
    pub(crate) articles_limit: Option<u32>,

    /// Key stories kept per theme (1-5)
    #[arg(long)]
    pub(crate) stories_per_theme: Option<u8>,

    /// Model temperature for the draft (0.1-1.0)
    #[arg(long)]
    pub(crate) temperature: Option<f32>,

    /// Leave sector ETF performance out of the analysis
    #[arg(long)]
    pub(crate) no_sectors: bool,

    /// Leave disclaimers and compliance notices out of the text export
    #[arg(long)]
    pub(crate) no_compliance: bool,

    /// Leave source attribution out of the news digest
    #[arg(long)]
    pub(crate) no_sources: bool,

    /// Skip the email-ready export
    #[arg(long)]
    pub(crate) no_email: bool,

    /// Directory the exports are written to
    #[arg(short, long, default_value = "reports")]
    pub(crate) out: PathBuf,

    /// Configuration file (default: built-in settings)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// TOML file holding API keys (defaults to the configured secrets file)
    #[arg(long)]
    pub(crate) secrets: Option<PathBuf>,
}
