//! Command-line interface for shuddho
//!
//! Provides argument parsing using clap derive macros.

use crate::correction::Mode;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Bengali sentence spelling correction
#[derive(Parser, Debug)]
#[command(name = "shuddho", version, about = "Bengali sentence spelling correction")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Artifact manifest to load (overrides config and SHUDDHO_ARTIFACT)
    #[arg(long, global = true, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (-v: info, -vv: per-token decisions, -vvv: rule trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output switches shared by `correct` and `batch`.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Correction mode: conservative or aggressive (default from config)
    #[arg(long, short, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Emit one JSON object per sentence
    #[arg(long)]
    pub json: bool,

    /// Print only the corrected sentence
    #[arg(long, conflicts_with = "json")]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Correct a sentence, or each line of stdin when TEXT is omitted
    Correct {
        /// Sentence to correct
        text: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Correct every line of a file on a worker pool
    Batch {
        /// Input file, one sentence per line
        file: PathBuf,

        #[command(flatten)]
        render: RenderArgs,

        /// Worker threads (0: one per core; default from config)
        #[arg(long, short, value_name = "N")]
        workers: Option<usize>,
    },

    /// Show conservative and aggressive corrections side by side
    Compare {
        /// Sentence to correct
        text: String,
    },

    /// Print the character edit distance between two strings
    Distance { a: String, b: String },

    /// Summarize the loaded artifact
    Inspect,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., correction.mode)
    Get {
        /// Dotted key path (e.g., correction.mode, output.workers)
        key: String,
    },
    /// Set a configuration value by key
    Set {
        /// Dotted key path (e.g., correction.mode, output.workers)
        key: String,
        /// Value to set
        value: String,
    },
    /// List current configuration values
    List,
    /// Print the configuration file path
    Path,
}
