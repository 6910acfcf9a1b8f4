//! Batch kill.

use std::process::ExitCode;

use anyhow::Result;
use hostscope_core::{HostManager, KillBatchResult, PortManager, ProcessManager};

pub fn run(pids: &[String], as_ports: bool, json: bool) -> Result<ExitCode> {
    let services = super::host_services()?;
    let result = if as_ports {
        PortManager::new(services).kill_selected(pids)
    } else {
        ProcessManager::new(services).kill_selected(pids)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_outcomes(&result);
    }

    Ok(if result.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_outcomes(result: &KillBatchResult) {
    for outcome in &result.results {
        let mark = if outcome.success { "✓" } else { "✗" };
        println!("{} {:>8}  {}", mark, outcome.pid, outcome.message);
    }

    println!();
    println!(
        "{} ({} of {} succeeded)",
        result.message, result.summary.success, result.summary.total
    );
}
