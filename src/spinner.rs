#![forbid(unsafe_code)]

//! Progress spinner shown while the downloader runs
//!
//! The spinner ticks on indicatif's background thread. [`SpinnerGuard`]
//! stops and clears it when dropped, so every exit path (including unwinding)
//! releases it.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(80);
const TICK_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"];

/// Scoped progress spinner
pub struct SpinnerGuard {
    bar: ProgressBar,
}

impl SpinnerGuard {
    /// Start a spinner with the given message
    ///
    /// When `enabled` is false the spinner is hidden; [`suspend`](Self::suspend)
    /// still works so callers do not need to branch.
    pub fn start(message: &str, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICK_FRAMES);
        bar.set_style(style);
        bar.set_message(message.to_string());

        if enabled {
            bar.enable_steady_tick(TICK_INTERVAL);
        }

        SpinnerGuard { bar }
    }

    /// Run `f` with the spinner temporarily erased from the terminal
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
