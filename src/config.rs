//! Configuration file parsing and validation

pub mod copypasta_toml;

pub use copypasta_toml::{
    ColorOption, Config, ConfigError, DownloaderConfig, OutputConfig, OutputFormat,
    DEFAULT_CONFIG_FILE,
};
