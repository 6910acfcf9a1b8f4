//! Application layer - Query and kill managers.
//!
//! Managers are thin orchestrators over the shared collaborators in
//! [`HostServices`]:
//! - validate input before any command is built
//! - run the platform command through the executor
//! - hand raw lines to the formatter pipeline

mod input;
mod kill;
mod port_manager;
mod process_manager;

use std::sync::Arc;

use tracing::debug;

pub use input::{
    validate_pid, validate_port_number, validate_process_identifier, validate_process_name,
};
pub use port_manager::PortManager;
pub use process_manager::{ProcessManager, DEFAULT_HIGH_CPU_THRESHOLD};

use crate::adapters::{ShellNameResolver, SystemShell};
use crate::commands::command_table;
use crate::config::Config;
use crate::domain::Platform;
use crate::error::{Error, Result};
use crate::executor::CommandExecutor;
use crate::formatter::DataFormatter;
use crate::parser::OutputParser;
use crate::ports::{ShellPort, SystemInfo};

/// Collaborators shared by the port and process managers.
#[derive(Debug, Clone)]
pub struct HostServices {
    platform: Platform,
    executor: CommandExecutor,
    formatter: Arc<DataFormatter>,
    protected_pid_threshold: i64,
}

impl HostServices {
    /// Wire the detected platform to the system shell.
    pub fn system(config: &Config) -> Result<Self> {
        let shell = SystemShell::new(config.command_timeout())?;
        Self::with_shell(Platform::detect(), Arc::new(shell), config)
    }

    /// Wire an explicit platform and shell.
    pub fn with_shell(
        platform: Platform,
        shell: Arc<dyn ShellPort>,
        config: &Config,
    ) -> Result<Self> {
        let executor = CommandExecutor::new(platform, shell);

        let mut parser =
            OutputParser::for_platform(platform).with_lookup_cache(config.cache_process_lookups);
        if config.resolve_process_names {
            parser = parser.with_resolver(Arc::new(ShellNameResolver::new(executor.clone())));
        }

        let mut formatter = DataFormatter::new(parser);
        formatter.initialize()?;

        debug!(platform = %platform, "Host services ready");
        Ok(Self {
            platform,
            executor,
            formatter: Arc::new(formatter),
            protected_pid_threshold: config.protected_pid_threshold,
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    pub fn formatter(&self) -> &DataFormatter {
        &self.formatter
    }

    pub fn protected_pid_threshold(&self) -> i64 {
        self.protected_pid_threshold
    }

    /// Run a listing command and return its lines.
    ///
    /// A narrowed listing (`| grep`, `| findstr`, `lsof -i :PORT`) that exits 1
    /// with no output matched nothing, which is an empty listing rather than a
    /// failure.
    pub(crate) fn run_listing(&self, command: &str, narrowed: bool) -> Result<Vec<String>> {
        match self.executor.execute(command) {
            Ok(output) => Ok(output.lines),
            Err(Error::CommandFailed {
                exit_code: 1,
                output,
                ..
            }) if narrowed && output.trim().is_empty() => {
                debug!(command = %command, "Narrowed listing matched nothing");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Required tools are present and the formatter supports the platform.
    pub fn is_ready(&self) -> bool {
        self.executor.verify_required_commands(self.platform).is_ok()
            && self.formatter.is_available()
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo {
            operating_system: self.platform.to_string(),
            available_commands: command_table(self.platform).entries().into_iter().collect(),
            service_ready: self.is_ready(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::testing::ScriptedShell;

    #[test]
    fn test_system_info() {
        let shell = ScriptedShell::new();
        let services =
            HostServices::with_shell(Platform::MacOs, Arc::new(shell), &Config::default())
                .unwrap();

        let info = services.system_info();
        assert_eq!(info.operating_system, "macos");
        assert!(info.service_ready);
        assert_eq!(info.available_commands["port_query"], "lsof -i -P -n");
        assert_eq!(info.available_commands["kill_process"], "kill -9 %s");
        assert_eq!(info.available_commands.len(), 5);
    }

    #[test]
    fn test_not_ready_without_tools() {
        let shell = ScriptedShell::new().without_tool("ss");
        let services =
            HostServices::with_shell(Platform::Linux, Arc::new(shell), &Config::default())
                .unwrap();
        assert!(!services.is_ready());
        assert!(!services.system_info().service_ready);
    }

    #[test]
    fn test_run_listing_no_match() {
        let shell = ScriptedShell::new()
            .respond("ss -tulpn | grep \":9999\"", &[], 1)
            .respond("ss -tulpn", &[], 1);
        let services =
            HostServices::with_shell(Platform::Linux, Arc::new(shell), &Config::default())
                .unwrap();

        assert!(services
            .run_listing("ss -tulpn | grep \":9999\"", true)
            .unwrap()
            .is_empty());
        assert!(matches!(
            services.run_listing("ss -tulpn", false),
            Err(Error::CommandFailed { exit_code: 1, .. })
        ));
    }
}
