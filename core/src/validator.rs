//! Record validation and ordering.

use crate::domain::{PortRecord, ProcessRecord};

/// Keep records with a port in 1..=65535 and order them by port number.
///
/// The sort is stable, so rows sharing a port keep their listing order.
pub fn validate_ports(mut ports: Vec<PortRecord>) -> Vec<PortRecord> {
    ports.retain(PortRecord::is_valid_port);
    ports.sort_by_key(|p| p.port_number().unwrap_or_default());
    ports
}

/// Keep records with a positive numeric PID and order them by PID.
pub fn validate_processes(mut processes: Vec<ProcessRecord>) -> Vec<ProcessRecord> {
    processes.retain(ProcessRecord::is_valid_pid);
    processes.sort_by_key(|p| p.pid_number().unwrap_or_default());
    processes
}
