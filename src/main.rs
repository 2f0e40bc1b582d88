//! copypasta - Main entry point

use clap::Parser;
use clap::error::ErrorKind;
use copypasta::app;
use copypasta::cli::Cli;
use copypasta::config::ColorOption;
use copypasta::error::{EXIT_SUCCESS, EXIT_USAGE};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit(EXIT_SUCCESS),
                _ => exit(EXIT_USAGE),
            };
        }
    };

    init_logging(&cli);
    debug!("CLI arguments: {:?}", cli);

    match app::run(&cli) {
        Ok(()) => exit(EXIT_SUCCESS),
        Err(e) => {
            debug!(error = ?e, "invocation failed");
            app::report_error(&e, cli.color.unwrap_or(ColorOption::Auto));
            exit(e.exit_code())
        }
    }
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

/// Log to stderr so relayed output on stdout stays clean
fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
