//! Kill outcomes and batch aggregation.

use serde::{Deserialize, Serialize};

pub const NO_SELECTION_MESSAGE: &str = "No processes selected for killing";

/// How a single kill attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KillStatus {
    Killed,
    InvalidPidFormat,
    PermissionDenied,
    ProtectedProcess,
    Failed,
}

impl KillStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, KillStatus::Killed)
    }
}

/// Result of one kill attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillOutcome {
    /// Target identifier exactly as requested.
    pub pid: String,
    pub success: bool,
    pub status: KillStatus,
    pub message: String,
}

impl KillOutcome {
    pub fn killed(pid: impl Into<String>) -> Self {
        Self::new(pid, KillStatus::Killed, "Process killed successfully")
    }

    pub fn invalid_format(pid: impl Into<String>) -> Self {
        Self::new(pid, KillStatus::InvalidPidFormat, "Invalid PID format")
    }

    pub fn protected(pid: impl Into<String>) -> Self {
        Self::new(pid, KillStatus::ProtectedProcess, "Cannot kill system process")
    }

    pub fn permission_denied(pid: impl Into<String>) -> Self {
        Self::new(
            pid,
            KillStatus::PermissionDenied,
            "Permission denied - run as administrator",
        )
    }

    pub fn failed(pid: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(pid, KillStatus::Failed, message)
    }

    fn new(pid: impl Into<String>, status: KillStatus, message: impl Into<String>) -> Self {
        Self {
            pid: pid.into(),
            success: status.is_success(),
            status,
            message: message.into(),
        }
    }
}

/// Counts over one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// Aggregate of a kill batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillBatchResult {
    /// True when at least one target was killed.
    pub success: bool,
    pub message: String,
    pub results: Vec<KillOutcome>,
    pub summary: KillSummary,
}

impl KillBatchResult {
    /// Result for an empty selection; no command is attempted.
    pub fn empty_selection() -> Self {
        Self {
            success: false,
            message: NO_SELECTION_MESSAGE.to_string(),
            results: Vec::new(),
            summary: KillSummary::default(),
        }
    }

    /// Aggregate per-target outcomes.
    pub fn from_outcomes(results: Vec<KillOutcome>) -> Self {
        let success = results.iter().filter(|r| r.success).count();
        let summary = KillSummary {
            total: results.len(),
            success,
            failed: results.len() - success,
        };

        Self {
            success: summary.success > 0,
            message: summary_message(summary.success, summary.failed),
            results,
            summary,
        }
    }

    /// True when every target was killed.
    pub fn all_succeeded(&self) -> bool {
        self.summary.total > 0 && self.summary.failed == 0
    }
}

fn summary_message(success: usize, failed: usize) -> String {
    match (success, failed) {
        (0, 0) => "No processes were processed".to_string(),
        (0, failed) => format!("Failed to kill {} process(es)", failed),
        (success, 0) => format!("Successfully killed {} process(es)", success),
        (success, failed) => format!(
            "Killed {} process(es), failed to kill {} process(es)",
            success, failed
        ),
    }
}
