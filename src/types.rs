#![forbid(unsafe_code)]

//! Core value types shared across modules

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Download mode selected by the `<type>` positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Recursive site download with links rewritten for local viewing
    Mirror,
    /// Mirror plus everything needed to render each page
    Page,
}

impl Mode {
    /// Returns the keyword accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Mirror => "mirror",
            Mode::Page => "page",
        }
    }
}

impl FromStr for Mode {
    type Err = ();

    /// Parses a mode keyword. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mirror" => Ok(Mode::Mirror),
            "page" => Ok(Mode::Page),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request to mirror `url` in `mode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub url: String,
    pub mode: Mode,
}

impl Invocation {
    pub fn new(url: impl Into<String>, mode: Mode) -> Self {
        Invocation {
            url: url.into(),
            mode,
        }
    }
}

/// Display category of a relayed output line
///
/// Categories only pick a color; they never influence control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Line starting with `[`
    Progress,
    /// DNS resolution
    Resolving,
    /// TCP connection
    Connecting,
    /// Request sent / response status
    HttpStatus,
    /// 304 responses
    NotModified,
    /// Everything else
    Default,
}

/// Child pipe a line was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Final state of a finished downloader process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code, or `None` if the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Number of lines relayed from both streams
    pub lines: usize,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
