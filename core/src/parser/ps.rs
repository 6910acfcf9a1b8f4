//! `ps aux` output (macOS and Linux).

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{ProcessRecord, DEFAULT_STATUS};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// USER PID %CPU %MEM VSZ RSS TTY STAT START TIME COMMAND
const PS_COLUMNS: usize = 11;

/// Parse `ps aux` rows. The COMMAND column keeps its embedded spaces.
pub(super) fn parse_ps<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<ProcessRecord> {
    let mut processes = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("USER") || line.contains("PID") {
            continue;
        }

        let parts: Vec<&str> = WHITESPACE.splitn(line, PS_COLUMNS).collect();
        if parts.len() < PS_COLUMNS {
            continue;
        }

        let command = parts[10];
        let executable = command.split(' ').next().unwrap_or(command);
        let status = match parts[7] {
            "" => DEFAULT_STATUS,
            stat => stat,
        };

        processes.push(ProcessRecord::new(
            parts[1],
            basename(executable),
            parts[0],
            format!("{}%", parts[2]),
            format!("{}%", parts[3]),
            command,
            status,
        ));
    }

    processes
}

/// Last `/`-separated component; a trailing slash is ignored.
fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return path;
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
