use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "cnapp-dashboard",
    version,
    about = "A terminal dashboard for categorized CNAPP widgets",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory holding the persisted dashboard.
    #[arg(long, value_name = "DIR", env = "CNAPP_DASHBOARD_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep changes in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Enable mouse capture.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,

    /// Run a single command instead of the interactive dashboard.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List widgets grouped by category.
    List {
        /// Only show this category.
        #[arg(long)]
        category: Option<String>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Search widget names and content (case-insensitive).
    Search {
        /// Text to look for. Empty matches everything.
        #[arg(default_value = "")]
        term: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Add a widget to a category.
    Add {
        #[arg(long)]
        category: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
    },
    /// Change a widget's name or content.
    Edit {
        #[arg(long)]
        category: String,
        #[arg(long)]
        widget: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Delete a widget.
    Remove {
        #[arg(long)]
        category: String,
        #[arg(long)]
        widget: String,
    },
}
