#![forbid(unsafe_code)]

//! Downloader process execution and output relay
//!
//! The child runs with both pipes captured. One reader thread per pipe
//! forwards lines over a channel to the calling thread, which classifies
//! them and hands them to the sink. Order within each stream is preserved.

use crate::classify::classify;
use crate::command::CommandSpec;
use crate::error::Error;
use crate::output::LineSink;
use crate::spinner::SpinnerGuard;
use crate::types::{RunOutcome, Stream};
use crossbeam_channel::Sender;
use std::io::{self, BufRead, BufReader, Read};
use std::process::Stdio;
use std::thread;
use tracing::{debug, info, warn};

const SPINNER_MESSAGE: &str = "Downloading...";

/// Messages from the pipe reader threads
#[derive(Debug)]
enum RelayEvent {
    Line { stream: Stream, text: String },
    ReadFailed { stream: Stream, error: io::Error },
}

/// Runs a downloader command and relays its output
#[derive(Debug, Clone, Copy)]
pub struct Runner {
    spinner: bool,
}

impl Runner {
    pub fn new(spinner: bool) -> Self {
        Runner { spinner }
    }

    /// Run `command` to completion, relaying every output line to `sink`
    ///
    /// A non-zero exit is not an error here; it is reported through the
    /// returned outcome and `sink.finish`.
    ///
    /// # Errors
    ///
    /// - [`Error::Spawn`] if the program cannot be started. The sink sees
    ///   no events at all in that case.
    /// - [`Error::Io`] if reading a pipe or writing to the sink fails. The
    ///   child is killed and reaped before returning.
    pub fn run(&self, command: &CommandSpec, sink: &mut dyn LineSink) -> Result<RunOutcome, Error> {
        let mut child = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: command.program.clone(),
                source,
            })?;
        info!(pid = child.id(), command = %command.display(), "downloader started");

        if let Err(error) = sink.start(command) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(error.into());
        }

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let spinner = SpinnerGuard::start(SPINNER_MESSAGE, self.spinner);

        let relayed = thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::unbounded();
            if let Some(pipe) = stdout {
                let tx = tx.clone();
                scope.spawn(move || pump(pipe, Stream::Stdout, tx));
            }
            if let Some(pipe) = stderr {
                let tx = tx.clone();
                scope.spawn(move || pump(pipe, Stream::Stderr, tx));
            }
            drop(tx);

            let mut lines: usize = 0;
            let mut failure: Option<io::Error> = None;

            // Keep draining after a failure so the readers never block on a full pipe
            for event in rx {
                match event {
                    RelayEvent::Line { stream, text } => {
                        if failure.is_some() {
                            continue;
                        }
                        let category = classify(&text);
                        match spinner.suspend(|| sink.line(stream, category, &text)) {
                            Ok(()) => lines += 1,
                            Err(error) => {
                                warn!(%error, "failed to write output, stopping downloader");
                                let _ = child.kill();
                                failure = Some(error);
                            }
                        }
                    }
                    RelayEvent::ReadFailed { stream, error } => {
                        warn!(?stream, %error, "failed to read downloader output");
                        if failure.is_none() {
                            let _ = child.kill();
                            failure = Some(error);
                        }
                    }
                }
            }

            match failure {
                Some(error) => Err(error),
                None => Ok(lines),
            }
        });
        drop(spinner);

        let status = child.wait()?;
        let lines = relayed?;
        debug!(%status, lines, "downloader exited");

        let outcome = RunOutcome {
            exit_code: status.code(),
            lines,
        };
        sink.finish(&outcome)?;

        Ok(outcome)
    }
}

/// Read `reader` line by line and forward each line until end-of-stream
fn pump<R: Read>(reader: R, stream: Stream, tx: Sender<RelayEvent>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = decode_line(&buf);
                if tx.send(RelayEvent::Line { stream, text }).is_err() {
                    break;
                }
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => {
                let _ = tx.send(RelayEvent::ReadFailed { stream, error });
                break;
            }
        }
    }
}

/// Decode raw line bytes, dropping the line terminator
///
/// Invalid UTF-8 is replaced rather than rejected.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    /// Sink that records every event
    #[derive(Default)]
    struct RecordingSink {
        started: bool,
        lines: Vec<(Stream, Category, String)>,
        outcome: Option<RunOutcome>,
    }

    impl LineSink for RecordingSink {
        fn start(&mut self, _command: &CommandSpec) -> io::Result<()> {
            self.started = true;
            Ok(())
        }

        fn line(&mut self, stream: Stream, category: Category, text: &str) -> io::Result<()> {
            self.lines.push((stream, category, text.to_string()));
            Ok(())
        }

        fn finish(&mut self, outcome: &RunOutcome) -> io::Result<()> {
            self.outcome = Some(*outcome);
            Ok(())
        }
    }

    /// Sink whose writes always fail
    struct BrokenSink;

    impl LineSink for BrokenSink {
        fn start(&mut self, _command: &CommandSpec) -> io::Result<()> {
            Ok(())
        }

        fn line(&mut self, _: Stream, _: Category, _: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn finish(&mut self, _outcome: &RunOutcome) -> io::Result<()> {
            panic!("finish must not be called after a relay failure");
        }
    }

    fn shell(script: &str) -> CommandSpec {
        CommandSpec {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    fn texts(sink: &RecordingSink, stream: Stream) -> Vec<String> {
        sink.lines
            .iter()
            .filter(|(s, _, _)| *s == stream)
            .map(|(_, _, text)| text.clone())
            .collect()
    }

    #[test]
    fn test_decode_line_strips_terminators() {
        assert_eq!(decode_line(b"hello\n"), "hello");
        assert_eq!(decode_line(b"hello\r\n"), "hello");
        assert_eq!(decode_line(b"no newline"), "no newline");
        assert_eq!(decode_line(b"  indented\n"), "  indented");
        assert_eq!(decode_line(b"\n"), "");
    }

    #[test]
    fn test_decode_line_replaces_invalid_utf8() {
        assert_eq!(decode_line(b"caf\xff\n"), "caf\u{fffd}");
    }

    #[test]
    fn test_pump_forwards_lines_in_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        pump(&b"one\ntwo\r\nthree"[..], Stream::Stdout, tx);

        let lines: Vec<String> = rx
            .iter()
            .map(|event| match event {
                RelayEvent::Line { text, .. } => text,
                RelayEvent::ReadFailed { error, .. } => panic!("read failed: {}", error),
            })
            .collect();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_relays_stdout_in_order_and_succeeds() {
        let mut sink = RecordingSink::default();
        let script = "for i in 1 2 3 4 5 6 7 8 9 10; do echo \"line $i\"; done";
        let outcome = Runner::new(false).run(&shell(script), &mut sink).unwrap();

        assert!(sink.started);
        let expected: Vec<String> = (1..=10).map(|i| format!("line {}", i)).collect();
        assert_eq!(texts(&sink, Stream::Stdout), expected);
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.lines, 10);
        assert_eq!(sink.outcome, Some(outcome));
    }

    #[cfg(unix)]
    #[test]
    fn test_classifies_relayed_lines() {
        let mut sink = RecordingSink::default();
        let script = "echo '[50%] downloading'; echo 'Resolving example.com...'; echo plain";
        Runner::new(false).run(&shell(script), &mut sink).unwrap();

        let categories: Vec<Category> = sink.lines.iter().map(|(_, c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![Category::Progress, Category::Resolving, Category::Default]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_relays_stderr() {
        let mut sink = RecordingSink::default();
        let script = "echo 'Connecting to 1.2.3.4' >&2; echo 'HTTP request sent' >&2";
        let outcome = Runner::new(false).run(&shell(script), &mut sink).unwrap();

        assert_eq!(
            texts(&sink, Stream::Stderr),
            vec!["Connecting to 1.2.3.4", "HTTP request sent"]
        );
        assert_eq!(sink.lines[0].1, Category::Connecting);
        assert_eq!(sink.lines[1].1, Category::HttpStatus);
        assert_eq!(outcome.lines, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_preserves_per_stream_order_when_interleaved() {
        let mut sink = RecordingSink::default();
        let script = "for i in $(seq 1 200); do echo \"out $i\"; echo \"err $i\" >&2; done";
        Runner::new(false).run(&shell(script), &mut sink).unwrap();

        let out: Vec<String> = (1..=200).map(|i| format!("out {}", i)).collect();
        let err: Vec<String> = (1..=200).map(|i| format!("err {}", i)).collect();
        assert_eq!(texts(&sink, Stream::Stdout), out);
        assert_eq!(texts(&sink, Stream::Stderr), err);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_reported_in_outcome() {
        let mut sink = RecordingSink::default();
        let outcome = Runner::new(false)
            .run(&shell("echo partial; exit 8"), &mut sink)
            .unwrap();

        assert_eq!(outcome.exit_code, Some(8));
        assert!(!outcome.success());
        assert_eq!(texts(&sink, Stream::Stdout), vec!["partial"]);
        assert_eq!(sink.outcome, Some(outcome));
    }

    #[cfg(unix)]
    #[test]
    fn test_no_output() {
        let mut sink = RecordingSink::default();
        let outcome = Runner::new(false).run(&shell("true"), &mut sink).unwrap();
        assert_eq!(outcome.lines, 0);
        assert!(outcome.success());
    }

    #[test]
    fn test_spawn_failure() {
        let mut sink = RecordingSink::default();
        let command = CommandSpec {
            program: "copypasta-no-such-downloader".to_string(),
            args: vec![],
        };
        let err = Runner::new(false).run(&command, &mut sink).unwrap_err();

        match err {
            Error::Spawn { program, .. } => assert_eq!(program, "copypasta-no-such-downloader"),
            other => panic!("expected Spawn, got {:?}", other),
        }
        assert!(!sink.started);
        assert!(sink.lines.is_empty());
        assert!(sink.outcome.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_sink_failure_stops_relay() {
        let script = "for i in $(seq 1 1000); do echo \"line $i\"; done";
        let err = Runner::new(false).run(&shell(script), &mut BrokenSink).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
