//! Shell execution port (interface).

use crate::error::Result;

/// Captured result of one shell invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// Combined stdout then stderr, one entry per line.
    pub lines: Vec<String>,

    /// Exit code; -1 when the process was terminated by a signal.
    pub exit_code: i32,
}

impl ShellOutput {
    pub fn new(lines: Vec<String>, exit_code: i32) -> Self {
        Self { lines, exit_code }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Lines joined back into one block of text.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Port for running a shell command line.
///
/// Implementations block until the command finishes. A nonzero exit code is
/// NOT an error at this level; only failing to run the command at all is.
pub trait ShellPort: Send + Sync {
    fn run(&self, command: &str) -> Result<ShellOutput>;
}
