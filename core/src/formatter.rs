//! Record normalization and the parse, normalize, validate pipeline.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{
    is_decimal, parse_integer, Platform, PortRecord, ProcessRecord, TableRow, UNKNOWN_PROCESS,
};
use crate::error::{Error, Result};
use crate::parser::OutputParser;
use crate::validator;

static PERCENT_SIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*%\s*").expect("valid percent regex"));

static SIZED_MEMORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d,]+)\s*([KMGT])\s*$").expect("valid memory regex"));

/// Addresses that mean "any".
const WILDCARD_ADDRESSES: [&str; 4] = ["0.0.0.0:0", "*:*", "0.0.0.0", "*"];

const MAX_COMMAND_LINE: usize = 100;

/// Turns raw tool output into normalized, validated, sorted records.
#[derive(Debug, Clone)]
pub struct DataFormatter {
    parser: OutputParser,
    initialized: bool,
}

impl DataFormatter {
    pub fn new(parser: OutputParser) -> Self {
        Self {
            parser,
            initialized: false,
        }
    }

    /// Check platform support and mark the formatter ready.
    pub fn initialize(&mut self) -> Result<()> {
        self.parser.platform()?;
        self.initialized = true;
        Ok(())
    }

    pub fn is_available(&self) -> bool {
        self.initialized && self.parser.is_supported()
    }

    pub fn parser(&self) -> &OutputParser {
        &self.parser
    }

    /// Parse, normalize, validate and sort port listing output.
    pub fn format_port_data<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<PortRecord>> {
        self.ensure_available()?;
        let platform = self.parser.platform()?;

        let parsed = self.parser.parse_port_output(lines)?;
        let parsed_count = parsed.len();
        let normalized = parsed
            .iter()
            .map(|record| normalize_port_record(record, platform))
            .collect();
        let ports = validator::validate_ports(normalized);

        debug!(parsed = parsed_count, kept = ports.len(), "Formatted port data");
        Ok(ports)
    }

    /// Parse, normalize, validate and sort process listing output.
    pub fn format_process_data<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<ProcessRecord>> {
        self.ensure_available()?;
        let platform = self.parser.platform()?;

        let parsed = self.parser.parse_process_output(lines)?;
        let parsed_count = parsed.len();
        let normalized = parsed
            .iter()
            .map(|record| normalize_process_record(record, platform))
            .collect();
        let processes = validator::validate_processes(normalized);

        debug!(parsed = parsed_count, kept = processes.len(), "Formatted process data");
        Ok(processes)
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::Unavailable("Data formatter"))
        }
    }
}

/// Canonical copy of a parsed port record.
pub fn normalize_port_record(record: &PortRecord, platform: Platform) -> PortRecord {
    PortRecord {
        port: normalize_port(&record.port),
        pid: normalize_pid(&record.pid),
        protocol: normalize_protocol(&record.protocol),
        local_address: normalize_address(&record.local_address),
        remote_address: normalize_address(&record.remote_address),
        state: normalize_state(&record.state),
        process_name: normalize_process_name(&record.process_name, platform),
        command_line: normalize_command_line(&record.command_line),
    }
}

/// Canonical copy of a parsed process record.
pub fn normalize_process_record(record: &ProcessRecord, platform: Platform) -> ProcessRecord {
    ProcessRecord {
        pid: normalize_pid(&record.pid),
        name: normalize_process_name(&record.name, platform),
        user: record.user.trim().to_string(),
        cpu_usage: normalize_cpu_usage(&record.cpu_usage),
        memory_usage: normalize_memory_usage(&record.memory_usage),
        command_line: normalize_command_line(&record.command_line),
        status: normalize_process_status(&record.status),
    }
}

/// In-range numbers are re-rendered; anything else is kept (trimmed) for the validator to drop.
pub fn normalize_port(port: &str) -> String {
    let port = port.trim();
    match parse_integer(port) {
        Some(n @ 1..=65535) => n.to_string(),
        _ => port.to_string(),
    }
}

pub fn normalize_pid(pid: &str) -> String {
    let pid = pid.trim();
    match parse_integer(pid) {
        Some(n) => n.to_string(),
        None => pid.to_string(),
    }
}

pub fn normalize_protocol(protocol: &str) -> String {
    protocol.trim().to_uppercase()
}

/// Collapse the wildcard spellings to `*`. IPv6 literals pass through.
pub fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if WILDCARD_ADDRESSES.contains(&address) {
        "*".to_string()
    } else {
        address.to_string()
    }
}

pub fn normalize_state(state: &str) -> String {
    let state = state.trim().to_uppercase();
    let canonical = match state.as_str() {
        "LISTENING" => "LISTEN",
        "ESTABLISHED" => "ESTAB",
        "TIME_WAIT" => "TIME-WAIT",
        "CLOSE_WAIT" => "CLOSE-WAIT",
        "FIN_WAIT1" => "FIN-WAIT-1",
        "FIN_WAIT2" => "FIN-WAIT-2",
        "SYN_SENT" => "SYN-SENT",
        "SYN_RECV" => "SYN-RECV",
        _ => return state,
    };
    canonical.to_string()
}

/// Basename of the process path; `.exe` suffixes are dropped on Windows only.
pub fn normalize_process_name(name: &str, platform: Platform) -> String {
    let name = name.trim();
    let mut name = name.rsplit(['/', '\\']).next().unwrap_or(name);

    if platform == Platform::Windows {
        while let Some(stem) = name.strip_suffix(".exe") {
            name = stem;
        }
    }
    name.to_string()
}

pub fn normalize_cpu_usage(cpu: &str) -> String {
    let cpu = cpu.trim();
    if is_decimal(cpu) {
        format!("{}%", cpu)
    } else {
        collapse_percent(cpu)
    }
}

/// `1,024 K` -> `1024 KB`, bare numbers are percentages.
pub fn normalize_memory_usage(memory: &str) -> String {
    let memory = memory.trim();

    if let Some(caps) = SIZED_MEMORY.captures(memory) {
        return format!("{} {}B", caps[1].replace(',', ""), &caps[2]);
    }

    if is_decimal(memory) {
        format!("{}%", memory)
    } else {
        collapse_percent(memory)
    }
}

fn collapse_percent(value: &str) -> String {
    if value.contains('%') {
        PERCENT_SIGN.replace_all(value, "%").into_owned()
    } else {
        value.to_string()
    }
}

/// Trim and cap at 100 characters, ellipsis included.
pub fn normalize_command_line(command_line: &str) -> String {
    let command_line = command_line.trim();
    truncate_chars(command_line, MAX_COMMAND_LINE)
}

/// Cut `value` to `max` characters, ending in `...` when shortened.
pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(max.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

/// Map `ps` STAT codes to labels.
pub fn normalize_process_status(status: &str) -> String {
    let status = status.trim();
    let label = match status {
        "R" => "Running",
        "S" => "Sleeping",
        "D" => "Waiting",
        "Z" => "Zombie",
        "T" => "Stopped",
        "I" => "Idle",
        "Ss" => "Sleeping (session leader)",
        "S+" => "Sleeping (foreground)",
        "R+" => "Running (foreground)",
        other => other,
    };
    label.to_string()
}

/// Records that render as fixed-width text rows.
pub trait TableDisplay {
    fn display_row(&self) -> TableRow;
}

impl TableDisplay for PortRecord {
    fn display_row(&self) -> TableRow {
        TableRow::new()
            .cell("port", format!("{:>6}", self.port))
            .cell("pid", format!("{:>8}", self.pid))
            .cell("protocol", format!("{:<8}", self.protocol))
            .cell("localAddress", format!("{:<20}", self.local_address))
            .cell("remoteAddress", format!("{:<20}", or_dash(&self.remote_address)))
            .cell("state", format!("{:<12}", or_dash(&self.state)))
            .cell("processName", self.display_process_name())
    }
}

impl TableDisplay for ProcessRecord {
    fn display_row(&self) -> TableRow {
        let status = if self.status.is_empty() {
            UNKNOWN_PROCESS
        } else {
            &self.status
        };

        TableRow::new()
            .cell("pid", format!("{:>8}", self.pid))
            .cell("name", format!("{:<20}", self.name))
            .cell("user", format!("{:<12}", or_dash(&self.user)))
            .cell("cpuUsage", format!("{:>8}", or_dash(&self.cpu_usage)))
            .cell("memoryUsage", format!("{:>12}", or_dash(&self.memory_usage)))
            .cell("status", status)
    }
}

/// Pad records into fixed-width columns for plain-text tables.
pub fn format_for_table_display<R: TableDisplay>(records: &[R]) -> Vec<TableRow> {
    records.iter().map(TableDisplay::display_row).collect()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(platform: Platform) -> DataFormatter {
        let mut formatter = DataFormatter::new(OutputParser::for_platform(platform));
        formatter.initialize().unwrap();
        formatter
    }

    #[test]
    fn test_windows_netstat_pipeline() {
        let lines = [
            "Proto  Local Address  Foreign Address  State  PID",
            "TCP    0.0.0.0:80    0.0.0.0:0    LISTENING    1234",
        ];
        let ports = formatter(Platform::Windows).format_port_data(&lines).unwrap();

        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].port, "80");
        assert_eq!(ports[0].pid, "1234");
        assert_eq!(ports[0].protocol, "TCP");
        assert_eq!(ports[0].state, "LISTEN");
        assert_eq!(ports[0].remote_address, "*");
    }

    #[test]
    fn test_linux_ss_pipeline() {
        let lines = [r#"LISTEN   0   128   0.0.0.0:22   0.0.0.0:*   users:(("sshd",pid=1234,fd=3))"#];
        let ports = formatter(Platform::Linux).format_port_data(&lines).unwrap();

        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].port, "22");
        assert_eq!(ports[0].process_name, "sshd");
        assert_eq!(ports[0].state, "LISTEN");
    }

    #[test]
    fn test_pipeline_drops_invalid_and_sorts() {
        let lines = [
            r#"LISTEN 0 128 0.0.0.0:8080 0.0.0.0:* users:(("java",pid=300,fd=3))"#,
            r#"LISTEN 0 128 0.0.0.0:22 0.0.0.0:* users:(("sshd",pid=100,fd=3))"#,
            r#"LISTEN 0 128 0.0.0.0:0 0.0.0.0:* users:(("zero",pid=5,fd=3))"#,
            r#"LISTEN 0 128 0.0.0.0:70000 0.0.0.0:* users:(("big",pid=6,fd=3))"#,
            r#"LISTEN 0 128 0.0.0.0:443 0.0.0.0:* users:(("nginx",pid=200,fd=3))"#,
        ];
        let ports = formatter(Platform::Linux).format_port_data(&lines).unwrap();

        let numbers: Vec<&str> = ports.iter().map(|p| p.port.as_str()).collect();
        assert_eq!(numbers, vec!["22", "443", "8080"]);
    }

    #[test]
    fn test_process_pipeline() {
        let lines = [
            "USER PID %CPU %MEM VSZ RSS TTY STAT START TIME COMMAND",
            "alice 3300 12.0 4.2 1 1 pts/0 R+ 10:05 1:30 /usr/bin/python3 app.py",
            "root 1 0.0 0.1 1 1 ? Ss Oct18 0:04 /sbin/init",
        ];
        let processes = formatter(Platform::Linux).format_process_data(&lines).unwrap();

        assert_eq!(processes.len(), 2);
        assert_eq!(processes[0].pid, "1");
        assert_eq!(processes[0].status, "Sleeping (session leader)");
        assert_eq!(processes[1].name, "python3");
        assert_eq!(processes[1].cpu_usage, "12.0%");
        assert_eq!(processes[1].status, "Running (foreground)");
    }

    #[test]
    fn test_tasklist_pipeline_strips_exe() {
        let lines = [
            r#""Image Name","PID","Session Name","Session#","Mem Usage""#,
            r#""chrome.exe","4321","Console","1","120,500 K""#,
        ];
        let processes = formatter(Platform::Windows)
            .format_process_data(&lines)
            .unwrap();

        assert_eq!(processes[0].name, "chrome");
        assert_eq!(processes[0].memory_usage, "120500 KB");
    }

    #[test]
    fn test_uninitialized_formatter_is_unavailable() {
        let formatter = DataFormatter::new(OutputParser::for_platform(Platform::Linux));
        assert!(!formatter.is_available());
        let empty: [&str; 0] = [];
        assert!(matches!(
            formatter.format_port_data(&empty),
            Err(Error::Unavailable(_))
        ));

        let mut unsupported = DataFormatter::new(OutputParser::new("plan9"));
        assert!(matches!(
            unsupported.initialize(),
            Err(Error::UnsupportedPlatform(_))
        ));
        assert!(!unsupported.is_available());
    }

    #[test]
    fn test_memory_normalization() {
        assert_eq!(normalize_memory_usage("1,024 K"), "1024 KB");
        assert_eq!(normalize_memory_usage("2.5"), "2.5%");
        assert_eq!(normalize_memory_usage("512M"), "512 MB");
        assert_eq!(normalize_memory_usage(" 3.1 % "), "3.1%");
        assert_eq!(normalize_memory_usage("N/A"), "N/A");
    }

    #[test]
    fn test_cpu_normalization() {
        assert_eq!(normalize_cpu_usage("12"), "12%");
        assert_eq!(normalize_cpu_usage("0.5 %"), "0.5%");
        assert_eq!(normalize_cpu_usage(""), "");
    }

    #[test]
    fn test_field_normalization() {
        assert_eq!(normalize_port(" 080 "), "80");
        assert_eq!(normalize_port("70000"), "70000");
        assert_eq!(normalize_port("abc"), "abc");
        assert_eq!(normalize_pid("007"), "7");
        assert_eq!(normalize_protocol("udp"), "UDP");

        assert_eq!(normalize_address("0.0.0.0:0"), "*");
        assert_eq!(normalize_address("*:*"), "*");
        assert_eq!(normalize_address("[::]:0"), "[::]:0");

        assert_eq!(normalize_state("time_wait"), "TIME-WAIT");
        assert_eq!(normalize_state("FIN_WAIT2"), "FIN-WAIT-2");
        assert_eq!(normalize_state("unconn"), "UNCONN");

        assert_eq!(
            normalize_process_name("C:\\Windows\\System32\\svchost.exe", Platform::Windows),
            "svchost"
        );
        assert_eq!(normalize_process_name("/usr/bin/node.exe", Platform::Linux), "node.exe");

        assert_eq!(normalize_process_status("Z"), "Zombie");
        assert_eq!(normalize_process_status("Sl"), "Sl");
    }

    #[test]
    fn test_command_line_truncation() {
        let long = "x".repeat(150);
        let truncated = normalize_command_line(&long);
        assert_eq!(truncated.chars().count(), 100);
        assert!(truncated.ends_with("..."));

        let exact = "y".repeat(100);
        assert_eq!(normalize_command_line(&exact), exact);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let port = PortRecord::new(
            " 0443",
            "0099",
            "tcp",
            "0.0.0.0",
            "*:*",
            "Established",
            "/opt/bin/server.exe",
        )
        .with_command_line("z".repeat(120));
        let process = ProcessRecord::new(
            "12",
            "C:\\apps\\tool.exe",
            " bob ",
            "1.5",
            "1,024 K",
            "  tool --flag  ",
            "S+",
        );

        for platform in Platform::ALL {
            let once = normalize_port_record(&port, platform);
            assert_eq!(normalize_port_record(&once, platform), once);

            let once = normalize_process_record(&process, platform);
            assert_eq!(normalize_process_record(&once, platform), once);

            let once = normalize_process_name("C:\\bin\\tool.exe.exe", platform);
            assert_eq!(normalize_process_name(&once, platform), once);
        }

        assert_eq!(
            normalize_process_name("C:\\bin\\tool.exe.exe", Platform::Windows),
            "tool"
        );
    }

    #[test]
    fn test_format_for_table_display() {
        let ports = vec![PortRecord::new("80", "1234", "TCP", "*:80", "", "", "")];
        let rows = format_for_table_display(&ports);
        assert_eq!(rows[0].get("port"), Some("    80"));
        assert_eq!(rows[0].get("pid"), Some("    1234"));
        assert_eq!(rows[0].get("protocol"), Some("TCP     "));
        assert_eq!(rows[0].get("remoteAddress").map(str::trim_end), Some("-"));
        assert_eq!(rows[0].get("state"), Some("-           "));
        assert_eq!(rows[0].get("processName"), Some("Unknown"));

        let processes = vec![ProcessRecord::new("7", "bash", "", "", "2 MB", "", "")];
        let rows = format_for_table_display(&processes);
        assert_eq!(rows[0].get("user"), Some("-           "));
        assert_eq!(rows[0].get("cpuUsage"), Some("       -"));
        assert_eq!(rows[0].get("memoryUsage"), Some("        2 MB"));
        assert_eq!(rows[0].get("status"), Some("Unknown"));
    }
}
