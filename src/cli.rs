use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Mode;
use crate::report::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "aocs")]
#[command(author, version, about = "Validate a repository against its code contract")]
#[command(long_about = "Checks source files against the rules declared in .aocs.json.\n\n\
    Exit codes:\n  \
    0 - No error-severity violations\n  \
    1 - Violations found\n  \
    2 - Runtime error (I/O, refused overwrite)")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a project against its contract
    Validate(ValidateArgs),

    /// Write a new contract and agent README
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Project root
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Exclude patterns relative to the project root (glob syntax, repeatable)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Apply automatic fixes (not implemented)
    #[arg(long)]
    pub fix: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project root
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Declared language (repeatable); prompted for when omitted
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// Enforcement mode [possible values: lite, strict]
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Accept defaults without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
