//! Output sinks for relayed downloader lines

pub mod human;
pub mod jsonl;

pub use human::{HumanFormatter, HumanSink};
pub use jsonl::JsonlSink;

use crate::command::CommandSpec;
use crate::types::{Category, RunOutcome, Stream};
use std::io;

/// Receives the events of a single downloader run, in order
pub trait LineSink {
    /// Called once before the process is spawned
    fn start(&mut self, command: &CommandSpec) -> io::Result<()>;

    /// Called for every line in the order it was read
    fn line(&mut self, stream: Stream, category: Category, text: &str) -> io::Result<()>;

    /// Called once after the process has exited and all lines were relayed
    fn finish(&mut self, outcome: &RunOutcome) -> io::Result<()>;
}
