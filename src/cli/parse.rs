//! CLI parse: clap types for taskdraft. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskdraft CLI - draft user-story/engineering-task lists with an AI provider
#[derive(Parser)]
#[command(name = "taskdraft")]
#[command(about = "Draft user-story/engineering-task lists with a text-generation provider")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/config.toml is read from here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a five-item task list from a goal, end users and constraints
    Generate {
        /// What the product or feature should achieve
        #[arg(long, default_value = "")]
        goal: String,
        /// Who will use it
        #[arg(long, default_value = "")]
        end_users: String,
        /// Technical or business constraints
        #[arg(long, default_value = "")]
        constraints: String,
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
        /// Fail instead of padding when fewer than five items come back
        #[arg(long)]
        strict: bool,
    },
    /// Parse captured model output into a task list without calling the provider
    Extract {
        /// File holding the raw model text (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output format (json or text)
        #[arg(long, default_value = "json")]
        format: String,
        /// Fail instead of padding when fewer than five items are found
        #[arg(long)]
        strict: bool,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key redacted)
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate configuration and report every problem
    Validate,
}
