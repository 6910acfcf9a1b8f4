//! Command execution with exit-code checking and tool discovery.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::commands::build_availability_probe;
use crate::domain::Platform;
use crate::error::{Error, Result};
use crate::ports::{ShellOutput, ShellPort};

/// Runs command lines through a [`ShellPort`] and turns nonzero exits into errors.
///
/// Cheap to clone; clones share the underlying shell.
#[derive(Clone)]
pub struct CommandExecutor {
    platform: Platform,
    shell: Arc<dyn ShellPort>,
}

impl CommandExecutor {
    /// Create an executor whose probes follow `platform` conventions.
    pub fn new(platform: Platform, shell: Arc<dyn ShellPort>) -> Self {
        Self { platform, shell }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Run `command`, failing with [`Error::CommandFailed`] on a nonzero exit.
    pub fn execute(&self, command: &str) -> Result<ShellOutput> {
        debug!(command = %command, "Executing command");
        let output = self.shell.run(command)?;

        if !output.success() {
            debug!(
                command = %command,
                exit_code = output.exit_code,
                "Command exited with failure"
            );
            return Err(Error::CommandFailed {
                command: command.to_string(),
                exit_code: output.exit_code,
                output: output.text(),
            });
        }

        debug!(command = %command, lines = output.lines.len(), "Command finished");
        Ok(output)
    }

    /// Check whether `name` resolves on `PATH` (`which` / `where`).
    pub fn is_command_available(&self, name: &str) -> bool {
        let probe = build_availability_probe(self.platform, name);
        match self.shell.run(&probe) {
            Ok(output) => output.success(),
            Err(e) => {
                warn!(tool = name, error = %e, "Availability probe failed to run");
                false
            }
        }
    }

    /// Fail with [`Error::MissingTool`] on the first required tool that is absent.
    pub fn verify_required_commands(&self, platform: Platform) -> Result<()> {
        for tool in platform.required_tools() {
            if !self.is_command_available(tool) {
                warn!(tool = *tool, platform = %platform, "Required tool is missing");
                return Err(Error::MissingTool(tool.to_string()));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
