//! Command construction from per-platform templates.
//!
//! Targets are interpolated verbatim, no shell escaping happens here. Every
//! caller validates its target first (numeric port, numeric PID, or a process
//! name that passed name validation).

use crate::domain::Platform;

/// Placeholder replaced by the target value.
const PLACEHOLDER: &str = "%s";

/// Command templates for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTable {
    pub port_query: &'static str,
    pub port_query_specific: &'static str,
    pub process_query: &'static str,
    pub process_query_specific: &'static str,
    pub kill_process: &'static str,
}

impl CommandTable {
    /// Named templates, in a fixed order.
    pub fn entries(&self) -> [(&'static str, &'static str); 5] {
        [
            ("port_query", self.port_query),
            ("port_query_specific", self.port_query_specific),
            ("process_query", self.process_query),
            ("process_query_specific", self.process_query_specific),
            ("kill_process", self.kill_process),
        ]
    }
}

const WINDOWS: CommandTable = CommandTable {
    port_query: "netstat -ano",
    port_query_specific: "netstat -ano | findstr \":%s\"",
    process_query: "tasklist /fo csv",
    process_query_specific: "tasklist /fo csv /fi \"imagename eq %s*\"",
    kill_process: "taskkill /f /pid %s",
};

const MACOS: CommandTable = CommandTable {
    port_query: "lsof -i -P -n",
    port_query_specific: "lsof -i :%s -P -n",
    process_query: "ps aux",
    process_query_specific: "ps aux | grep -i \"%s\" | grep -v grep",
    kill_process: "kill -9 %s",
};

const LINUX: CommandTable = CommandTable {
    port_query: "ss -tulpn",
    port_query_specific: "ss -tulpn | grep \":%s\"",
    process_query: "ps aux",
    process_query_specific: "ps aux | grep -i \"%s\" | grep -v grep",
    kill_process: "kill -9 %s",
};

/// Template table for a platform.
pub fn command_table(platform: Platform) -> &'static CommandTable {
    match platform {
        Platform::Windows => &WINDOWS,
        Platform::MacOs => &MACOS,
        Platform::Linux => &LINUX,
    }
}

fn interpolate(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}

/// Build a port listing command, optionally narrowed to one port.
pub fn build_port_query(platform: Platform, port: Option<&str>) -> String {
    let table = command_table(platform);
    match port {
        Some(port) => interpolate(table.port_query_specific, port),
        None => table.port_query.to_string(),
    }
}

/// Build a process listing command, optionally narrowed to a name or PID.
pub fn build_process_query(platform: Platform, identifier: Option<&str>) -> String {
    let table = command_table(platform);
    match identifier {
        Some(identifier) => interpolate(table.process_query_specific, identifier),
        None => table.process_query.to_string(),
    }
}

/// Build the forced kill command for a PID.
pub fn build_kill_command(platform: Platform, pid: &str) -> String {
    interpolate(command_table(platform).kill_process, pid)
}

/// Build the single-PID name lookup used to resolve netstat rows.
pub fn build_process_name_lookup(platform: Platform, pid: &str) -> String {
    match platform {
        Platform::Windows => format!("tasklist /fi \"pid eq {}\" /fo csv /nh", pid),
        Platform::MacOs | Platform::Linux => format!("ps -p {} -o comm=", pid),
    }
}

/// Build the probe that succeeds iff `tool` is on `PATH`.
pub fn build_availability_probe(platform: Platform, tool: &str) -> String {
    match platform {
        Platform::Windows => format!("where {}", tool),
        Platform::MacOs | Platform::Linux => format!("which {}", tool),
    }
}
