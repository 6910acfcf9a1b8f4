//! Host diagnostics and effective configuration.

use std::process::ExitCode;

use anyhow::Result;
use hostscope_core::{HostManager, PortManager, ProcessManager, SystemInfo};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManagerInfo {
    manager: &'static str,
    #[serde(flatten)]
    info: SystemInfo,
}

pub fn show(json: bool) -> Result<ExitCode> {
    let services = super::host_services()?;
    let ports = PortManager::new(services.clone());
    let processes = ProcessManager::new(services);

    let infos = [
        ManagerInfo {
            manager: ports.display_name(),
            info: ports.system_info(),
        },
        ManagerInfo {
            manager: processes.display_name(),
            info: processes.system_info(),
        },
    ];

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(ExitCode::SUCCESS);
    }

    for entry in &infos {
        println!("{}", entry.manager);
        println!("  Operating system: {}", entry.info.operating_system);
        println!(
            "  Ready:            {}",
            if entry.info.service_ready { "yes" } else { "no" }
        );
        println!("  Commands:");
        for (name, template) in &entry.info.available_commands {
            println!("    {:<16} {}", name, template);
        }
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

pub fn config(json: bool) -> Result<ExitCode> {
    let config = super::load_config()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Command timeout:         {}s", config.command_timeout_secs);
    println!("Protected PID threshold: {}", config.protected_pid_threshold);
    println!("Resolve process names:   {}", config.resolve_process_names);
    println!("Cache process lookups:   {}", config.cache_process_lookups);

    Ok(ExitCode::SUCCESS)
}
