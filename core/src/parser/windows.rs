//! `netstat -ano` and `tasklist /fo csv` output.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{PortRecord, ProcessRecord, DEFAULT_STATUS};

use super::utils::{split_csv_line, trailing_port};
use super::NameLookup;

// Proto, local, foreign, optional state, pid. UDP rows carry no state.
static NETSTAT_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+)\s+(\S+)\s+(\S+)(?:\s+(\w+))?\s+(\d+)").expect("valid netstat regex")
});

/// Parse `netstat -ano` rows.
///
/// ```text
/// Proto  Local Address          Foreign Address        State           PID
/// TCP    0.0.0.0:80             0.0.0.0:0              LISTENING       1234
/// UDP    0.0.0.0:53             *:*                                    9012
/// ```
pub(super) fn parse_netstat<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    names: &mut NameLookup<'_>,
) -> Vec<PortRecord> {
    let mut ports = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("Proto") {
            continue;
        }

        let Some(caps) = NETSTAT_ROW.captures(line) else {
            continue;
        };

        let protocol = &caps[1];
        let local_address = &caps[2];
        let Some(port) = trailing_port(local_address) else {
            continue;
        };

        let pid = &caps[5];
        let mut state = caps.get(4).map_or("", |m| m.as_str());
        // A numeric token in the state slot is a PID, never a state
        if state.bytes().all(|b| b.is_ascii_digit()) || protocol.eq_ignore_ascii_case("udp") {
            state = "";
        }

        ports.push(PortRecord::new(
            port,
            pid,
            protocol.to_lowercase(),
            local_address,
            &caps[3],
            state,
            names.name_for(pid),
        ));
    }

    ports
}

/// Parse `tasklist /fo csv` rows. The first line is the header.
pub(super) fn parse_tasklist<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<ProcessRecord> {
    let mut processes = Vec::new();

    for line in lines.into_iter().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_csv_line(line);
        if fields.len() < 5 {
            continue;
        }

        // Image Name, PID, Session Name, Session#, Mem Usage
        processes.push(ProcessRecord::new(
            &fields[1],
            &fields[0],
            "",
            "",
            &fields[4],
            &fields[0],
            DEFAULT_STATUS,
        ));
    }

    processes
}
