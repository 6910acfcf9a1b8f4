//! `ss -tulpn` output.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::PortRecord;

use super::utils::trailing_port;

static OWNER_PID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pid=(\d+)").expect("valid ss pid regex"));

static OWNER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\(\("([^"]+)""#).expect("valid ss name regex"));

/// Socket families `ss` prints in its leading Netid column.
const NETIDS: &[&str] = &[
    "tcp", "udp", "raw", "mptcp", "sctp", "u_str", "u_dgr", "u_seq", "p_raw", "p_dgr", "nl",
    "icmp6", "tipc", "xdp", "vsock",
];

/// Parse `ss` rows.
///
/// ```text
/// State    Recv-Q Send-Q Local Address:Port  Peer Address:Port  Process
/// LISTEN   0      128    0.0.0.0:22          0.0.0.0:*          users:(("sshd",pid=1234,fd=3))
/// ```
///
/// Rows that start with a Netid column (`tcp   LISTEN ...`) are shifted by
/// one token and take their protocol from it; otherwise the protocol is tcp.
pub(super) fn parse_ss<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<PortRecord> {
    let mut ports = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("State") || line.starts_with("Netid") {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let (protocol, cols) = match parts.first() {
            Some(first) if NETIDS.contains(first) => (*first, &parts[1..]),
            _ => ("tcp", &parts[..]),
        };
        if cols.len() < 5 {
            continue;
        }

        let local_address = cols[3];
        let Some(port) = trailing_port(local_address) else {
            continue;
        };

        let owner = cols[5..].join(" ");
        let (pid, process_name) = match OWNER_PID.captures(&owner) {
            Some(pid) => {
                let name = OWNER_NAME
                    .captures(&owner)
                    .map(|caps| caps[1].to_string())
                    .unwrap_or_default();
                (pid[1].to_string(), name)
            }
            None => (String::new(), String::new()),
        };

        ports.push(PortRecord::new(
            port,
            pid,
            protocol,
            local_address,
            cols[4],
            cols[0],
            process_name,
        ));
    }

    ports
}
