#![forbid(unsafe_code)]

//! Parsing for `copypasta.toml`
//!
//! Every key is optional; missing keys fall back to built-in defaults.
//!
//! ```toml
//! [downloader]
//! program = "wget"
//! extra_args = ["--no-verbose"]
//!
//! [output]
//! color = "auto"
//! format = "human"
//! spinner = true
//! ```

use serde::Deserialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "copypasta.toml";

/// Errors that can occur while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root of `copypasta.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub downloader: DownloaderConfig,
    pub output: OutputConfig,
}

/// `[downloader]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DownloaderConfig {
    /// Binary to invoke, resolved through `PATH` when not absolute
    pub program: String,
    /// Arguments placed after the mode flags and before the URL
    pub extra_args: Vec<String>,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        DownloaderConfig {
            program: "wget".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    pub color: ColorOption,
    pub format: OutputFormat,
    pub spinner: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            color: ColorOption::Auto,
            format: OutputFormat::Human,
            spinner: true,
        }
    }
}

/// When to emit color codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorOption {
    /// Resolve to a termcolor choice for stdout
    pub fn to_color_choice(self) -> termcolor::ColorChoice {
        match self {
            ColorOption::Always => termcolor::ColorChoice::Always,
            ColorOption::Never => termcolor::ColorChoice::Never,
            ColorOption::Auto => {
                if std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal() {
                    termcolor::ColorChoice::Auto
                } else {
                    termcolor::ColorChoice::Never
                }
            }
        }
    }
}

/// How relayed lines are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored lines for terminals
    #[default]
    Human,
    /// One JSON record per line
    Jsonl,
}

impl Config {
    /// Parse config from a TOML string
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Find and load the config for this run
    ///
    /// An explicit path must exist. Without one, `copypasta.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }
}
