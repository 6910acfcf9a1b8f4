//! Sequential kill batches.

use tracing::{info, warn};

use crate::commands::build_kill_command;
use crate::domain::{KillBatchResult, KillOutcome};
use crate::executor::CommandExecutor;

use super::input::validate_pid;

/// Kill `ids` one at a time, in order.
///
/// PIDs at or below `protected_threshold` are refused without running a
/// command. A failing target never stops the batch.
pub(crate) fn kill_batch(
    executor: &CommandExecutor,
    ids: &[String],
    protected_threshold: Option<i64>,
) -> KillBatchResult {
    if ids.is_empty() {
        return KillBatchResult::empty_selection();
    }

    let outcomes = ids
        .iter()
        .map(|id| kill_one(executor, id, protected_threshold))
        .collect();
    let result = KillBatchResult::from_outcomes(outcomes);

    info!(
        total = result.summary.total,
        success = result.summary.success,
        failed = result.summary.failed,
        "Kill batch finished"
    );
    result
}

fn kill_one(executor: &CommandExecutor, id: &str, protected_threshold: Option<i64>) -> KillOutcome {
    let Some(pid) = validate_pid(id) else {
        warn!(pid = id, "Rejected kill target with invalid PID");
        return KillOutcome::invalid_format(id);
    };

    if matches!(protected_threshold, Some(threshold) if pid <= threshold) {
        warn!(pid, "Refused to kill protected process");
        return KillOutcome::protected(id);
    }

    let command = build_kill_command(executor.platform(), &pid.to_string());
    match executor.execute(&command) {
        Ok(_) => {
            info!(pid, "Process killed");
            KillOutcome::killed(id)
        }
        Err(e) if e.is_permission_denied() => {
            warn!(pid, error = %e, "Kill denied");
            KillOutcome::permission_denied(id)
        }
        Err(e) => {
            warn!(pid, error = %e, "Kill failed");
            KillOutcome::failed(id, e.to_string())
        }
    }
}
