//! CLI definitions for splitscreen.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// splitscreen CLI.
#[derive(Parser)]
#[command(name = "splitscreen")]
#[command(about = "MCP server for split-screen window control")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.config/splitscreen/config.toml)
    #[arg(short, long, global = true, env = "SPLITSCREEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Working directory handed to tools
    #[arg(short, long, global = true)]
    pub work_dir: Option<PathBuf>,

    /// Print structured JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Serve MCP over stdio (default)
    Serve,

    /// Arrange the foreground window once and exit
    Control {
        /// Action, e.g. set-left-half, maximize, set-top-right-quarter
        action: String,
    },

    /// Show Accessibility state and the available control tier
    Status,

    /// List applications with dedicated recipes
    Targets,
}
