//! `lsof -i -P -n` output.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::PortRecord;

use super::utils::decode_lsof_escapes;

static LISTEN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"TCP\s+([^:]+):(\d+)\s*\(LISTEN\)").expect("valid lsof name regex")
});

/// Index of the first token of the NAME column.
const NAME_COLUMN: usize = 7;

/// Parse `lsof` rows into listening TCP sockets.
///
/// Only `TCP <addr>:<port> (LISTEN)` names are recognized. Established
/// connections, UDP sockets and bracketed IPv6 addresses are skipped.
pub(super) fn parse_lsof<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<PortRecord> {
    let mut ports = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("COMMAND") {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < NAME_COLUMN + 1 || !line.contains("TCP") {
            continue;
        }

        let name = parts[NAME_COLUMN..].join(" ");
        let Some(caps) = LISTEN_NAME.captures(&name) else {
            continue;
        };

        let address = &caps[1];
        let port = &caps[2];
        ports.push(PortRecord::new(
            port,
            parts[1],
            "tcp",
            format!("{}:{}", address, port),
            "",
            "LISTEN",
            decode_lsof_escapes(parts[0]),
        ));
    }

    ports
}
