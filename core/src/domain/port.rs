//! Port record data structure.

use serde::{Deserialize, Serialize};

use super::numeric::parse_integer;

/// Placeholder for a process that could not be resolved.
pub const UNKNOWN_PROCESS: &str = "Unknown";

/// One observed listening or connected socket.
///
/// Fields stay string-typed because they come straight from tool output;
/// numeric validity of `port` and `pid` is checked by the validator, not here.
/// Empty strings mean "not reported".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortRecord {
    /// The port number (e.g., "3000").
    pub port: String,

    /// Process ID owning the socket.
    pub pid: String,

    /// "TCP" or "UDP" once normalized.
    pub protocol: String,

    /// Local address including the port (e.g., "0.0.0.0:80").
    pub local_address: String,

    /// Peer address, "*" for a wildcard.
    pub remote_address: String,

    /// Connection state token (e.g., "LISTEN"), empty for stateless sockets.
    pub state: String,

    /// Best-effort owning process name.
    pub process_name: String,

    /// Owning process command line.
    pub command_line: String,
}

impl PortRecord {
    /// Create a record from the fields every port parser extracts.
    pub fn new(
        port: impl Into<String>,
        pid: impl Into<String>,
        protocol: impl Into<String>,
        local_address: impl Into<String>,
        remote_address: impl Into<String>,
        state: impl Into<String>,
        process_name: impl Into<String>,
    ) -> Self {
        Self {
            port: port.into(),
            pid: pid.into(),
            protocol: protocol.into(),
            local_address: local_address.into(),
            remote_address: remote_address.into(),
            state: state.into(),
            process_name: process_name.into(),
            command_line: String::new(),
        }
    }

    /// Attach a command line.
    pub fn with_command_line(mut self, command_line: impl Into<String>) -> Self {
        self.command_line = command_line.into();
        self
    }

    /// Numeric port value, if the field is a whole number.
    pub fn port_number(&self) -> Option<i64> {
        parse_integer(&self.port)
    }

    /// Port is numeric and within 1..=65535.
    pub fn is_valid_port(&self) -> bool {
        matches!(self.port_number(), Some(1..=65535))
    }

    /// Process name for display, "Unknown" when unresolved.
    pub fn display_process_name(&self) -> &str {
        if self.process_name.is_empty() {
            UNKNOWN_PROCESS
        } else {
            &self.process_name
        }
    }
}
