//! Port and process listings.

use std::process::ExitCode;

use anyhow::Result;
use hostscope_core::domain::{PORT_COLUMNS, PROCESS_COLUMNS};
use hostscope_core::{format_for_table_display, HostManager, PortManager, ProcessManager, TableRow};

/// Which processes `procs` lists.
pub enum ProcessFilter {
    /// Name or PID; empty lists everything.
    Query(String),
    User(String),
    HighCpu(f64),
    HighMemory,
}

pub fn ports(port: Option<&str>, json: bool) -> Result<ExitCode> {
    let manager = PortManager::new(super::host_services()?);
    let ports = manager.query(port.unwrap_or(""))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ports)?);
        return Ok(ExitCode::SUCCESS);
    }

    if ports.is_empty() {
        println!("No ports found.");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{:>6} {:>8} {:<8} {:<20} {:<20} {:<12} PROCESS",
        "PORT", "PID", "PROTO", "LOCAL", "REMOTE", "STATE"
    );
    println!("{}", "-".repeat(96));
    for row in format_for_table_display(&ports) {
        println!("{}", join_cells(&row));
    }

    println!();
    println!("Total: {} ports", ports.len());

    Ok(ExitCode::SUCCESS)
}

pub fn processes(filter: ProcessFilter, json: bool) -> Result<ExitCode> {
    let manager = ProcessManager::new(super::host_services()?);
    let processes = match filter {
        ProcessFilter::Query(target) => manager.query(&target)?,
        ProcessFilter::User(user) => manager.processes_by_user(&user)?,
        ProcessFilter::HighCpu(threshold) => manager.high_cpu_processes(threshold)?,
        ProcessFilter::HighMemory => manager.high_memory_processes()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&processes)?);
        return Ok(ExitCode::SUCCESS);
    }

    if processes.is_empty() {
        println!("No processes found.");
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{:>8} {:<20} {:<12} {:>8} {:>12} STATUS",
        "PID", "NAME", "USER", "CPU", "MEMORY"
    );
    println!("{}", "-".repeat(80));
    for row in format_for_table_display(&processes) {
        println!("{}", join_cells(&row));
    }

    println!();
    println!("Total: {} processes", processes.len());

    Ok(ExitCode::SUCCESS)
}

pub fn columns(ports: bool, json: bool) -> Result<ExitCode> {
    let columns = if ports { &PORT_COLUMNS } else { &PROCESS_COLUMNS };

    if json {
        println!("{}", serde_json::to_string_pretty(columns)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{:<16} {:<16} {:>6} {:<9} SORTABLE", "KEY", "LABEL", "WIDTH", "TYPE");
    for column in columns {
        let kind = serde_json::to_value(column.column_type)?;
        println!(
            "{:<16} {:<16} {:>6} {:<9} {}",
            column.key,
            column.label,
            column.width,
            kind.as_str().unwrap_or_default(),
            if column.sortable { "yes" } else { "no" }
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn join_cells(row: &TableRow) -> String {
    row.cells()
        .iter()
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
