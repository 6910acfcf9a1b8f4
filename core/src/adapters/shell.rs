//! System shell adapter backed by `tokio::process`.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::runtime::{Builder, Runtime};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ports::{ShellOutput, ShellPort};

/// Runs command lines through the host shell (`sh -c` / `cmd /C`).
///
/// Every command is bounded by a deadline; a child that overruns it is killed
/// and [`Error::CommandTimeout`] is returned. Calls block the current thread,
/// so this must not be used from inside another tokio runtime.
pub struct SystemShell {
    runtime: Runtime,
    timeout: Duration,
}

impl SystemShell {
    /// Create a shell that gives each command at most `timeout` to finish.
    pub fn new(timeout: Duration) -> Result<Self> {
        // Single-threaded runtime: it only drives one child process at a time
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create runtime: {}", e)))?;

        Ok(Self { runtime, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run_with_deadline(&self, command_line: &str) -> Result<ShellOutput> {
        let mut command = shell_command(command_line);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn()?;

        // Dropping the pending future on timeout drops the child, which kills it
        match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .map(str::to_string)
                    .collect();
                lines.extend(
                    String::from_utf8_lossy(&output.stderr)
                        .lines()
                        .map(str::to_string),
                );

                let exit_code = output.status.code().unwrap_or(-1);
                debug!(command = %command_line, exit_code, "Shell command completed");
                Ok(ShellOutput::new(lines, exit_code))
            }
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => {
                warn!(
                    command = %command_line,
                    timeout_secs = self.timeout.as_secs(),
                    "Shell command timed out, killing it"
                );
                Err(Error::CommandTimeout {
                    command: command_line.to_string(),
                    timeout: self.timeout,
                })
            }
        }
    }
}

impl ShellPort for SystemShell {
    fn run(&self, command: &str) -> Result<ShellOutput> {
        self.runtime.block_on(self.run_with_deadline(command))
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    // Pass the line untouched so embedded quotes reach cmd as written
    command.arg("/C").raw_arg(command_line);
    command
}

#[cfg(not(windows))]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}
