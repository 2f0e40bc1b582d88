#![forbid(unsafe_code)]

//! JSONL output for machine-readable relays
//!
//! Emits one JSON object per line:
//! 1. One command record
//! 2. One line record per relayed line, in relay order
//! 3. One status record

use super::LineSink;
use crate::command::CommandSpec;
use crate::types::{Category, RunOutcome, Stream};
use serde::Serialize;
use std::io::{self, Write};

/// Writes relayed lines as JSON Lines
pub struct JsonlSink<W: Write> {
    out: W,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(out: W) -> Self {
        JsonlSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Command record for JSONL output
#[derive(Debug, Serialize)]
struct CommandRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    program: &'a str,
    args: &'a [String],
}

/// Line record for JSONL output
#[derive(Debug, Serialize)]
struct LineRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    stream: Stream,
    category: Category,
    text: &'a str,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    success: bool,
    exit_code: Option<i32>,
    lines: usize,
}

impl<W: Write> LineSink for JsonlSink<W> {
    fn start(&mut self, command: &CommandSpec) -> io::Result<()> {
        self.emit(&CommandRecord {
            record_type: "command",
            program: &command.program,
            args: &command.args,
        })
    }

    fn line(&mut self, stream: Stream, category: Category, text: &str) -> io::Result<()> {
        self.emit(&LineRecord {
            record_type: "line",
            stream,
            category,
            text,
        })
    }

    fn finish(&mut self, outcome: &RunOutcome) -> io::Result<()> {
        self.emit(&StatusRecord {
            record_type: "status",
            success: outcome.success(),
            exit_code: outcome.exit_code,
            lines: outcome.lines,
        })
    }
}
