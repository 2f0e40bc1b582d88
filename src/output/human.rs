#![forbid(unsafe_code)]

//! Human-readable output with per-category colors
//!
//! Formatting returns owned strings with the color codes embedded, so no
//! terminal color state survives between lines.

use super::LineSink;
use crate::command::CommandSpec;
use crate::types::{Category, RunOutcome, Stream};
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, WriteColor};

/// Error notice printed once when the downloader fails
pub const ERROR_NOTICE: &str = "Error occurred!";

/// Completion notice printed once when the downloader succeeds
pub const SUCCESS_NOTICE: &str = "Download completed successfully!";

/// Colors lines by category
#[derive(Debug, Clone, Copy)]
pub struct HumanFormatter {
    color_choice: ColorChoice,
}

impl HumanFormatter {
    /// Creates a new HumanFormatter with the specified color choice
    pub fn new(color_choice: ColorChoice) -> Self {
        HumanFormatter { color_choice }
    }

    /// Display color for a category
    pub fn color_for(category: Category) -> Color {
        match category {
            Category::Progress => Color::Green,
            Category::Resolving => Color::Cyan,
            Category::Connecting => Color::Yellow,
            Category::HttpStatus => Color::Magenta,
            Category::NotModified => Color::Blue,
            Category::Default => Color::White,
        }
    }

    /// Format one relayed line
    pub fn format_line(&self, category: Category, line: &str) -> String {
        self.paint(Self::color_for(category), line)
    }

    /// Wrap `text` in the codes for `color`, resetting afterwards
    ///
    /// Returns `text` unchanged when colors are disabled.
    pub fn paint(&self, color: Color, text: &str) -> String {
        let mut buffer = match self.color_choice {
            ColorChoice::Never => Buffer::no_color(),
            _ => Buffer::ansi(),
        };

        // Writes into an in-memory buffer cannot fail
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = buffer.write_all(text.as_bytes());
        let _ = buffer.reset();

        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

/// Writes relayed lines as colored text
pub struct HumanSink<W: Write> {
    out: W,
    formatter: HumanFormatter,
}

impl<W: Write> HumanSink<W> {
    pub fn new(out: W, formatter: HumanFormatter) -> Self {
        HumanSink { out, formatter }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LineSink for HumanSink<W> {
    fn start(&mut self, command: &CommandSpec) -> io::Result<()> {
        let banner = format!("Running command: {}", command.display());
        writeln!(self.out, "{}", self.formatter.paint(Color::Green, &banner))?;
        self.out.flush()
    }

    fn line(&mut self, _stream: Stream, category: Category, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", self.formatter.format_line(category, text))?;
        self.out.flush()
    }

    fn finish(&mut self, outcome: &RunOutcome) -> io::Result<()> {
        let notice = if outcome.success() {
            self.formatter.paint(Color::Green, SUCCESS_NOTICE)
        } else {
            self.formatter.paint(Color::Red, ERROR_NOTICE)
        };
        writeln!(self.out, "{}", notice)?;
        self.out.flush()
    }
}
