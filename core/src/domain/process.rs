//! Process record data structure.

use serde::{Deserialize, Serialize};

use super::numeric::parse_integer;

/// Status reported when the source tool carries no live state.
pub const DEFAULT_STATUS: &str = "Running";

/// One observed OS process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub pid: String,
    pub name: String,
    pub user: String,
    /// e.g. "1.5%"
    pub cpu_usage: String,
    /// e.g. "45000 KB" or "0.8%"
    pub memory_usage: String,
    pub command_line: String,
    pub status: String,
}

impl ProcessRecord {
    pub fn new(
        pid: impl Into<String>,
        name: impl Into<String>,
        user: impl Into<String>,
        cpu_usage: impl Into<String>,
        memory_usage: impl Into<String>,
        command_line: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            pid: pid.into(),
            name: name.into(),
            user: user.into(),
            cpu_usage: cpu_usage.into(),
            memory_usage: memory_usage.into(),
            command_line: command_line.into(),
            status: status.into(),
        }
    }

    /// Numeric PID value, if the field is a whole number.
    pub fn pid_number(&self) -> Option<i64> {
        parse_integer(&self.pid)
    }

    /// PID is numeric and positive.
    pub fn is_valid_pid(&self) -> bool {
        matches!(self.pid_number(), Some(pid) if pid > 0)
    }

    /// Numeric part of the CPU usage ("12.5%" -> 12.5).
    pub fn cpu_percent(&self) -> Option<f64> {
        numeric_part(&self.cpu_usage)
    }

    /// Numeric part of the memory usage ("512 MB" -> 512.0).
    pub fn memory_amount(&self) -> Option<f64> {
        numeric_part(&self.memory_usage)
    }
}

fn numeric_part(value: &str) -> Option<f64> {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}
