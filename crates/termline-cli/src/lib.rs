//! termline - Status output from the shell
#![allow(clippy::missing_errors_doc)]
//!
//! Thin command line front end over the `termline` printers, useful for
//! shell scripts and for eyeballing how the printers behave on a real
//! terminal.
//!
//! # Settings precedence
//!
//! 1. Defaults
//! 2. `--config` file (or `TERMLINE_CONFIG`)
//! 3. Command line flags
//! 4. `NO_COLOR` in the environment

pub mod cmd;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use termline::OutputSettings;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "termline")]
#[command(author, version, about = "termline - in-place terminal status output")]
pub struct Cli {
    /// Output switches shared by every subcommand
    #[command(flatten)]
    pub output: OutputArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Global output switches.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Suppress all status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable spinner animation and progress bars
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Print debug lines
    #[arg(long, global = true)]
    pub debug: bool,

    /// Settings file (TOML)
    #[arg(long, global = true, env = "TERMLINE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl OutputArgs {
    /// Overlay the flags that are set onto `settings`.
    pub fn overlay(&self, mut settings: OutputSettings) -> OutputSettings {
        if self.quiet {
            settings.quiet = true;
        }
        if self.no_color {
            settings.color = false;
        }
        if self.no_progress {
            settings.progress = false;
        }
        if self.debug {
            settings.debug = true;
        }
        settings
    }

    /// Effective settings: file, then flags, then environment.
    pub async fn resolve(&self) -> Result<OutputSettings> {
        let base = match &self.config {
            Some(path) => OutputSettings::load(path)
                .await
                .with_context(|| format!("invalid config {}", path.display()))?,
            None => OutputSettings::default(),
        };
        Ok(self.overlay(base).with_env())
    }
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a single log line
    Log {
        /// Line level
        #[arg(value_enum)]
        level: Level,
        /// Message text
        message: String,
    },
    /// Run a spinner for a while, then finish it
    Spin(SpinArgs),
    /// Walk a progress bar from empty to full
    Progress(ProgressArgs),
    /// Print a JSON array of objects as a table
    Table {
        /// JSON file holding an array of objects
        file: PathBuf,
        /// Columns to show, in order (defaults to the first object's keys)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
    },
}

/// Log line level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    /// `➔ message`
    Info,
    /// `! message`
    Warn,
    /// `✘ message`
    Error,
    /// `? message`, only with `--debug`
    Debug,
}

/// Arguments of `termline spin`.
#[derive(Debug, Clone, Args)]
pub struct SpinArgs {
    /// Text next to the animation
    pub text: String,
    /// How long to spin
    #[arg(long, default_value_t = 1000)]
    pub millis: u64,
    /// Finish with the fail line instead of the success line
    #[arg(long)]
    pub fail: bool,
    /// Detail appended to the final line
    #[arg(long)]
    pub detail: Option<String>,
}

/// Arguments of `termline progress`.
#[derive(Debug, Clone, Args)]
pub struct ProgressArgs {
    /// Line shown above the bar
    #[arg(long, default_value = "Working")]
    pub text: String,
    /// Number of steps to walk through
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    pub steps: u32,
    /// Bar length in glyphs
    #[arg(long, default_value_t = 40)]
    pub bar_length: usize,
    /// Unit shown after the step counter
    #[arg(long)]
    pub unit: Option<String>,
    /// Show the step counter
    #[arg(long)]
    pub numeric: bool,
    /// Pause between steps
    #[arg(long, default_value_t = 50)]
    pub millis: u64,
}
