#![forbid(unsafe_code)]

//! Invocation flow: validate, configure, build, run

use crate::cli::{Cli, validate};
use crate::command::CommandSpec;
use crate::config::{ColorOption, Config, OutputFormat};
use crate::error::Error;
use crate::output::{HumanFormatter, HumanSink, JsonlSink};
use crate::runner::Runner;
use std::io::{self, IsTerminal, Write};
use termcolor::Color;
use tracing::{debug, info};

/// Run one copypasta invocation
///
/// Returns `Ok(())` only when the downloader exited with status 0 (or on
/// `--dry-run`). Output has already been written when an error is returned;
/// see [`report_error`] for the final message.
pub fn run(cli: &Cli) -> Result<(), Error> {
    let invocation = validate(cli.url.as_deref(), cli.mode.as_deref())?;
    debug!(?invocation, "arguments validated");

    let mut config = Config::discover(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    debug!(?config, "configuration resolved");

    let command = CommandSpec::build(
        &invocation,
        &config.downloader.program,
        &config.downloader.extra_args,
    );

    if cli.dry_run {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", command.display())?;
        return Ok(());
    }

    let spinner = config.output.spinner
        && config.output.format == OutputFormat::Human
        && io::stdout().is_terminal();
    let runner = Runner::new(spinner);

    let outcome = match config.output.format {
        OutputFormat::Human => {
            let formatter = HumanFormatter::new(config.output.color.to_color_choice());
            let mut sink = HumanSink::new(io::stdout(), formatter);
            runner.run(&command, &mut sink)?
        }
        OutputFormat::Jsonl => {
            let mut sink = JsonlSink::new(io::stdout());
            runner.run(&command, &mut sink)?
        }
    };

    if outcome.success() {
        info!(lines = outcome.lines, "download completed");
        Ok(())
    } else {
        info!(exit_code = ?outcome.exit_code, "downloader failed");
        Err(Error::ChildFailed {
            code: outcome.exit_code,
        })
    }
}

/// Print the user-facing message for a terminal error
///
/// Usage and invalid-mode messages go to stdout. Child failures were
/// already reported by the output sink. Everything else goes to stderr.
pub fn report_error(error: &Error, color: ColorOption) {
    let formatter = HumanFormatter::new(color.to_color_choice());
    let message = error.to_string();

    match error {
        Error::Usage => println!("{}", formatter.paint(Color::Yellow, &message)),
        Error::InvalidMode(_) => println!("{}", formatter.paint(Color::Red, &message)),
        Error::ChildFailed { .. } => {}
        _ => eprintln!("copypasta: {}", message),
    }
}
