#![forbid(unsafe_code)]

//! Command-line argument definitions

use crate::config::{ColorOption, Config, OutputFormat};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

/// Mirror websites through wget with colorized output
///
/// TYPE is `mirror` for a recursive site download or `page` to also fetch
/// the images and stylesheets each page needs.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "copypasta", version, about, long_about = None)]
pub struct Cli {
    /// URL to download
    pub url: Option<String>,

    /// Download type: mirror or page
    #[arg(value_name = "TYPE")]
    pub mode: Option<String>,

    /// Extra positionals after TYPE; accepted and ignored
    #[arg(hide = true)]
    pub rest: Vec<String>,

    /// Config file (default: ./copypasta.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Downloader binary to invoke
    #[arg(long, value_name = "PROGRAM")]
    pub downloader: Option<String>,

    /// When to use colors
    #[arg(long, value_enum)]
    pub color: Option<ColorOption>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Do not show the progress spinner
    #[arg(long)]
    pub no_spinner: bool,

    /// Print the downloader command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref program) = self.downloader {
            config.downloader.program = program.clone();
        }
        if let Some(color) = self.color {
            config.output.color = color;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.no_spinner {
            config.output.spinner = false;
        }
    }

    /// Log level selected by the `-v` count
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
