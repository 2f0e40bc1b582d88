#![forbid(unsafe_code)]

//! Downloader command construction
//!
//! Each mode maps to a fixed flag template. The URL always goes last.

use crate::types::{Invocation, Mode};
use std::process::Command;

const MIRROR_FLAGS: &[&str] = &["--mirror", "--convert-links", "--adjust-extension"];
const PAGE_FLAGS: &[&str] = &[
    "--mirror",
    "--convert-links",
    "--adjust-extension",
    "--page-requisites",
];

/// Returns the flag template for a mode
pub fn flags_for(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Mirror => MIRROR_FLAGS,
        Mode::Page => PAGE_FLAGS,
    }
}

/// A fully resolved downloader command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build the command for an invocation
    ///
    /// `extra_args` are inserted between the mode flags and the URL.
    pub fn build(invocation: &Invocation, program: &str, extra_args: &[String]) -> Self {
        let mut args: Vec<String> = flags_for(invocation.mode)
            .iter()
            .map(|flag| flag.to_string())
            .collect();
        args.extend(extra_args.iter().cloned());
        args.push(invocation.url.clone());

        CommandSpec {
            program: program.to_string(),
            args,
        }
    }

    /// Render as a single space-separated command line
    ///
    /// Used for display only; the process is spawned from the argv vector.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Create a `std::process::Command` for this spec
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_command() {
        let invocation = Invocation::new("http://example.com", Mode::Mirror);
        let spec = CommandSpec::build(&invocation, "wget", &[]);
        assert_eq!(
            spec.display(),
            "wget --mirror --convert-links --adjust-extension http://example.com"
        );
        assert_eq!(spec.args.len(), 4);
    }

    #[test]
    fn test_page_command() {
        let invocation = Invocation::new("http://example.com", Mode::Page);
        let spec = CommandSpec::build(&invocation, "wget", &[]);
        assert_eq!(
            spec.display(),
            "wget --mirror --convert-links --adjust-extension --page-requisites http://example.com"
        );
        assert_eq!(spec.args.len(), 5);
    }

    #[test]
    fn test_url_is_verbatim_and_last() {
        let url = "https://example.com/a b?x=1&y=$(whoami)";
        let invocation = Invocation::new(url, Mode::Page);
        let spec = CommandSpec::build(&invocation, "wget", &[]);
        assert_eq!(spec.args.last().map(String::as_str), Some(url));
    }

    #[test]
    fn test_extra_args_before_url() {
        let invocation = Invocation::new("http://example.com", Mode::Mirror);
        let extra = vec!["--no-verbose".to_string(), "--wait=1".to_string()];
        let spec = CommandSpec::build(&invocation, "/opt/bin/wget", &extra);
        assert_eq!(
            spec.display(),
            "/opt/bin/wget --mirror --convert-links --adjust-extension --no-verbose --wait=1 http://example.com"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let invocation = Invocation::new("http://example.com", Mode::Mirror);
        let first = CommandSpec::build(&invocation, "wget", &[]);
        let second = CommandSpec::build(&invocation, "wget", &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_to_command_uses_argv() {
        let invocation = Invocation::new("http://example.com", Mode::Mirror);
        let spec = CommandSpec::build(&invocation, "wget", &[]);
        let command = spec.to_command();
        assert_eq!(command.get_program(), "wget");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.len(), 4);
        assert_eq!(args[3], "http://example.com");
    }
}
