#![forbid(unsafe_code)]

//! Copypasta: mirror websites through wget with colorized output
//!
//! Copypasta validates a `<url> <type>` pair, builds a preset wget command
//! for it, runs the command and relays the downloader's output line by line,
//! tagging each line with a display color.

pub mod app;
pub mod classify;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod spinner;
pub mod types;

pub use error::Error;
