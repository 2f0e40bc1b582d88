//! CLI argument parsing and validation

pub mod args;
pub mod validate;

// Re-export types for convenient access
pub use args::Cli;
pub use validate::validate;
