//! Progress reporting for TTY and non-TTY environments.
//!
//! TTY mode: indicatif spinners per loading stage (cleared on completion).
//! Non-TTY mode: log-based output (no spinners).

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Central progress context managing multi-progress spinners.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        Self::with_tty(std::io::stderr().is_terminal())
    }

    /// Create a context with TTY mode forced on or off.
    pub fn with_tty(is_tty: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Create a stage status line managed by MultiProgress.
    ///
    /// Returns a spinner; update with `pb.set_message(...)` and call
    /// `pb.finish_and_clear()` when the stage is done. Hidden in non-TTY mode.
    pub fn stage_line(&self, name: &str) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new_spinner());
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} {prefix:<20.cyan.bold} {wide_msg}")
        {
            pb.set_style(style);
        }
        // Truncate long names to keep lines aligned
        let display: String = name.chars().take(20).collect();
        pb.set_prefix(display);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Print a line above managed spinners (avoids interference).
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.is_tty {
            let _ = self.multi.println(msg);
        } else {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a count with thousands separators: 1234567 → "1,234,567"
pub fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_small() {
        assert_eq!(fmt_num(0), "0");
        assert_eq!(fmt_num(123), "123");
    }

    #[test]
    fn fmt_num_thousands() {
        assert_eq!(fmt_num(1_000), "1,000");
        assert_eq!(fmt_num(123_456), "123,456");
        assert_eq!(fmt_num(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn non_tty_stage_line_is_hidden() {
        let ctx = ProgressContext::with_tty(false);
        assert!(!ctx.is_tty());
        assert!(ctx.stage_line("snapshot.json").is_hidden());
    }
}
