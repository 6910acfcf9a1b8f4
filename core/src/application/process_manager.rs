//! Process listing, filters and protected kills.

use tracing::debug;

use crate::commands::build_process_query;
use crate::domain::{
    KillBatchResult, ProcessRecord, TableColumn, TableRow, PROCESS_COLUMNS, UNKNOWN_PROCESS,
};
use crate::error::{Error, Result};
use crate::formatter::truncate_chars;
use crate::ports::{HostManager, SystemInfo};

use super::input::validate_process_identifier;
use super::kill::kill_batch;
use super::HostServices;

const QUERY_OPTIONS: &[(&str, &str)] = &[
    ("all_processes", "Query all running processes"),
    ("specific_process", "Query specific process by name"),
    ("specific_pid", "Query specific process by PID"),
    ("user_processes", "Query processes for current user only"),
];

/// Default CPU threshold, in percent, for [`ProcessManager::high_cpu_processes`].
pub const DEFAULT_HIGH_CPU_THRESHOLD: f64 = 10.0;

const HIGH_MEMORY_MB: f64 = 100.0;

const TABLE_COMMAND_LINE: usize = 50;

/// Lists processes and kills them, refusing low system PIDs.
#[derive(Debug, Clone)]
pub struct ProcessManager {
    services: HostServices,
}

impl ProcessManager {
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    /// Processes owned by exactly `user`.
    pub fn processes_by_user(&self, user: &str) -> Result<Vec<ProcessRecord>> {
        let mut processes = self.query("")?;
        processes.retain(|p| p.user == user);
        Ok(processes)
    }

    /// Processes using at least `threshold` percent CPU.
    pub fn high_cpu_processes(&self, threshold: f64) -> Result<Vec<ProcessRecord>> {
        let mut processes = self.query("")?;
        processes.retain(|p| matches!(p.cpu_percent(), Some(cpu) if cpu >= threshold));
        Ok(processes)
    }

    /// Processes reporting gigabytes of memory, or at least 100 MB.
    pub fn high_memory_processes(&self) -> Result<Vec<ProcessRecord>> {
        let mut processes = self.query("")?;
        processes.retain(is_high_memory);
        Ok(processes)
    }
}

fn is_high_memory(process: &ProcessRecord) -> bool {
    let memory = &process.memory_usage;
    memory.contains("GB")
        || (memory.contains("MB")
            && matches!(process.memory_amount(), Some(mb) if mb >= HIGH_MEMORY_MB))
}

impl HostManager for ProcessManager {
    type Record = ProcessRecord;

    fn display_name(&self) -> &'static str {
        "Process Manager"
    }

    fn query(&self, input: &str) -> Result<Vec<ProcessRecord>> {
        let identifier = validate_process_identifier(input)?;
        let command = build_process_query(self.services.platform(), identifier.as_deref());

        let lines = self
            .services
            .run_listing(&command, identifier.is_some())
            .map_err(|e| Error::query_failed("processes", input, e))?;
        let processes = self
            .services
            .formatter()
            .format_process_data(&lines)
            .map_err(|e| Error::query_failed("processes", input, e))?;

        debug!(input, count = processes.len(), "Process query finished");
        Ok(processes)
    }

    fn kill_selected(&self, ids: &[String]) -> KillBatchResult {
        kill_batch(
            self.services.executor(),
            ids,
            Some(self.services.protected_pid_threshold()),
        )
    }

    fn table_columns(&self) -> &'static [TableColumn] {
        &PROCESS_COLUMNS
    }

    fn query_options(&self) -> &'static [(&'static str, &'static str)] {
        QUERY_OPTIONS
    }

    fn table_rows(&self, records: &[ProcessRecord]) -> Vec<TableRow> {
        records
            .iter()
            .map(|process| {
                TableRow::new()
                    .cell("id", &process.pid)
                    .cell("pid", &process.pid)
                    .cell("name", &process.name)
                    .cell("user", or_dash(&process.user))
                    .cell("cpuUsage", or_dash(&process.cpu_usage))
                    .cell("memoryUsage", or_dash(&process.memory_usage))
                    .cell("status", or_unknown(&process.status))
                    .cell(
                        "commandLine",
                        truncate_chars(&process.command_line, TABLE_COMMAND_LINE),
                    )
            })
            .collect()
    }

    fn is_ready(&self) -> bool {
        self.services.is_ready()
    }

    fn system_info(&self) -> SystemInfo {
        self.services.system_info()
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        UNKNOWN_PROCESS
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::domain::{KillStatus, Platform};
    use crate::executor::testing::ScriptedShell;

    const PS_OUTPUT: &[&str] = &[
        "USER       PID %CPU %MEM    VSZ   RSS TTY      STAT START   TIME COMMAND",
        "root       812  0.3  1.0 200000 10000 ?       Ssl  Oct18   2:00 /usr/lib/systemd/systemd-journald",
        "alice     3300 42.0  4.2 900000 420000 pts/0  R+   10:05   1:30 /usr/bin/python3 train.py --epochs 10",
        "root         1  0.0  0.1 167744 11792 ?        Ss   Oct18   0:04 /sbin/init splash",
        "alice     2000  9.9  0.5  50000  5000 pts/1    S    09:00   0:01 -bash",
    ];

    fn manager(platform: Platform, shell: Arc<ScriptedShell>) -> ProcessManager {
        ProcessManager::new(
            HostServices::with_shell(platform, shell, &Config::default()).unwrap(),
        )
    }

    fn ps_manager() -> ProcessManager {
        manager(
            Platform::Linux,
            Arc::new(ScriptedShell::new().respond("ps aux", PS_OUTPUT, 0)),
        )
    }

    #[test]
    fn test_query_sorted_by_pid() {
        let processes = ps_manager().query("").unwrap();

        let pids: Vec<&str> = processes.iter().map(|p| p.pid.as_str()).collect();
        assert_eq!(pids, vec!["1", "812", "2000", "3300"]);
        assert_eq!(processes[0].name, "init");
        assert_eq!(processes[0].status, "Sleeping (session leader)");
        assert_eq!(processes[1].status, "Ssl");
        assert_eq!(processes[2].name, "-bash");
        assert_eq!(processes[3].cpu_usage, "42.0%");
    }

    #[test]
    fn test_query_by_name_and_pid() {
        let shell = Arc::new(
            ScriptedShell::new()
                .respond(
                    "ps aux | grep -i \"python3\" | grep -v grep",
                    &PS_OUTPUT[2..3],
                    0,
                )
                .respond("ps aux | grep -i \"42\" | grep -v grep", &[], 1),
        );
        let manager = manager(Platform::MacOs, shell.clone());

        let processes = manager.query("python3").unwrap();
        assert_eq!(processes.len(), 1);
        assert_eq!(processes[0].user, "alice");

        assert!(manager.query("0042").unwrap().is_empty());
        assert_eq!(
            shell.calls(),
            vec![
                "ps aux | grep -i \"python3\" | grep -v grep",
                "ps aux | grep -i \"42\" | grep -v grep"
            ]
        );
    }

    #[test]
    fn test_query_windows_tasklist() {
        let shell = Arc::new(ScriptedShell::new().respond(
            "tasklist /fo csv /fi \"imagename eq node*\"",
            &[
                r#""Image Name","PID","Session Name","Session#","Mem Usage""#,
                r#""node.exe","7000","Console","1","85,312 K""#,
            ],
            0,
        ));
        let processes = manager(Platform::Windows, shell).query("node").unwrap();

        assert_eq!(processes.len(), 1);
        assert_eq!(processes[0].name, "node");
        assert_eq!(processes[0].memory_usage, "85312 KB");
        assert_eq!(processes[0].status, "Running");
    }

    #[test]
    fn test_invalid_input() {
        let shell = Arc::new(ScriptedShell::new());
        let manager = manager(Platform::Linux, shell.clone());

        assert!(matches!(manager.query("-1"), Err(Error::InvalidInput(_))));
        assert!(matches!(manager.query("a\"b"), Err(Error::InvalidInput(_))));
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn test_protected_pid_rejected_without_command() {
        let shell = Arc::new(ScriptedShell::new());
        let manager = manager(Platform::Linux, shell.clone());

        let result = manager.kill_selected(&["5".to_string()]);
        assert!(!result.success);
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].status, KillStatus::ProtectedProcess);
        assert_eq!(result.results[0].message, "Cannot kill system process");
        assert_eq!(result.message, "Failed to kill 1 process(es)");
        assert!(shell.calls().is_empty());
    }

    #[test]
    fn test_protected_threshold_from_config() {
        let shell = Arc::new(ScriptedShell::new().respond("kill -9 50", &[], 0));
        let config = Config {
            protected_pid_threshold: 100,
            ..Config::default()
        };
        let manager = ProcessManager::new(
            HostServices::with_shell(Platform::Linux, shell.clone(), &config).unwrap(),
        );

        let result = manager.kill_selected(&["50".to_string(), "500".to_string()]);
        assert_eq!(result.results[0].status, KillStatus::ProtectedProcess);
        assert_eq!(result.results[1].status, KillStatus::Failed);
        assert_eq!(shell.calls(), vec!["kill -9 500"]);
    }

    #[test]
    fn test_filters() {
        let manager = ps_manager();

        let alice: Vec<String> = manager
            .processes_by_user("alice")
            .unwrap()
            .into_iter()
            .map(|p| p.pid)
            .collect();
        assert_eq!(alice, vec!["2000", "3300"]);

        let busy = manager.high_cpu_processes(DEFAULT_HIGH_CPU_THRESHOLD).unwrap();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].pid, "3300");

        // ps reports memory as a percentage, never as MB/GB
        assert!(manager.high_memory_processes().unwrap().is_empty());
    }

    #[test]
    fn test_high_memory_rule() {
        let with_memory = |memory: &str| ProcessRecord::new("9", "x", "", "", memory, "", "");
        assert!(is_high_memory(&with_memory("2 GB")));
        assert!(is_high_memory(&with_memory("100 MB")));
        assert!(!is_high_memory(&with_memory("99.5 MB")));
        assert!(!is_high_memory(&with_memory("500000 KB")));
        assert!(!is_high_memory(&with_memory("45.0%")));
    }

    #[test]
    fn test_table_rows() {
        let manager = ps_manager();
        assert_eq!(manager.display_name(), "Process Manager");
        assert_eq!(manager.table_columns().len(), 8);
        assert_eq!(manager.query_options()[2].0, "specific_pid");

        let long = ProcessRecord::new("44", "java", "", "", "", "j".repeat(60), "");
        let short = ProcessRecord::new("45", "sh", "bob", "1.0%", "0.1%", "sh -c true", "Running");
        let rows = manager.table_rows(&[long, short]);

        assert_eq!(rows[0].get("id"), Some("44"));
        assert_eq!(rows[0].get("user"), Some("-"));
        assert_eq!(rows[0].get("status"), Some("Unknown"));
        let command = rows[0].get("commandLine").unwrap();
        assert_eq!(command.len(), 50);
        assert!(command.ends_with("..."));

        assert_eq!(rows[1].get("commandLine"), Some("sh -c true"));
        assert_eq!(rows[1].get("cpuUsage"), Some("1.0%"));
    }
}
