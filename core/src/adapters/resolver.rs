//! Process name lookup through the platform's process listing tool.

use tracing::debug;

use crate::commands::build_process_name_lookup;
use crate::executor::CommandExecutor;
use crate::parser::split_csv_line;
use crate::ports::ProcessNameResolver;

/// Resolves a PID to a process name with one `tasklist` / `ps -p` call per lookup.
#[derive(Debug, Clone)]
pub struct ShellNameResolver {
    executor: CommandExecutor,
}

impl ShellNameResolver {
    pub fn new(executor: CommandExecutor) -> Self {
        Self { executor }
    }
}

impl ProcessNameResolver for ShellNameResolver {
    fn resolve(&self, pid: &str) -> Option<String> {
        let platform = self.executor.platform();
        let command = build_process_name_lookup(platform, pid);

        let output = match self.executor.execute(&command) {
            Ok(output) => output,
            Err(e) => {
                debug!(pid, error = %e, "Process name lookup failed");
                return None;
            }
        };

        let first = output
            .lines
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())?;

        let name = if platform == crate::domain::Platform::Windows {
            // tasklist reports a miss as an INFO line with exit code 0
            if first.starts_with("INFO:") {
                return None;
            }
            split_csv_line(first).into_iter().next()?
        } else {
            first.to_string()
        };

        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Platform;
    use crate::executor::testing::ScriptedShell;

    #[test]
    fn test_resolve_windows() {
        let shell = ScriptedShell::new()
            .respond(
                "tasklist /fi \"pid eq 5432\" /fo csv /nh",
                &["\"node.exe\",\"5432\",\"Console\",\"1\",\"45,000 K\""],
                0,
            )
            .respond(
                "tasklist /fi \"pid eq 9\" /fo csv /nh",
                &["INFO: No tasks are running which match the specified criteria."],
                0,
            );
        let resolver =
            ShellNameResolver::new(CommandExecutor::new(Platform::Windows, Arc::new(shell)));

        assert_eq!(resolver.resolve("5432"), Some("node.exe".to_string()));
        assert_eq!(resolver.resolve("9"), None);
    }

    #[test]
    fn test_resolve_unix() {
        let shell = ScriptedShell::new().respond("ps -p 77 -o comm=", &["/usr/sbin/sshd"], 0);
        let resolver =
            ShellNameResolver::new(CommandExecutor::new(Platform::Linux, Arc::new(shell)));

        assert_eq!(resolver.resolve("77"), Some("/usr/sbin/sshd".to_string()));
        // Unscripted command exits nonzero
        assert_eq!(resolver.resolve("78"), None);
    }
}
