//! Port listing and kill-by-owner.

use tracing::debug;

use crate::commands::build_port_query;
use crate::domain::{KillBatchResult, PortRecord, TableColumn, TableRow, PORT_COLUMNS};
use crate::error::{Error, Result};
use crate::ports::{HostManager, SystemInfo};

use super::input::validate_port_number;
use super::kill::kill_batch;
use super::HostServices;

const QUERY_OPTIONS: &[(&str, &str)] = &[
    ("all_ports", "Query all active ports"),
    ("specific_port", "Query specific port number"),
    ("listening_only", "Query listening ports only"),
    ("established_only", "Query established connections only"),
];

/// Lists sockets and kills their owning processes.
#[derive(Debug, Clone)]
pub struct PortManager {
    services: HostServices,
}

impl PortManager {
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }
}

impl HostManager for PortManager {
    type Record = PortRecord;

    fn display_name(&self) -> &'static str {
        "Port Manager"
    }

    fn query(&self, input: &str) -> Result<Vec<PortRecord>> {
        let port = validate_port_number(input)?;
        let command = build_port_query(self.services.platform(), port.as_deref());

        let lines = self
            .services
            .run_listing(&command, port.is_some())
            .map_err(|e| Error::query_failed("ports", input, e))?;
        let ports = self
            .services
            .formatter()
            .format_port_data(&lines)
            .map_err(|e| Error::query_failed("ports", input, e))?;

        debug!(input, count = ports.len(), "Port query finished");
        Ok(ports)
    }

    /// Port rows have no protected range; owners are killed as listed.
    fn kill_selected(&self, ids: &[String]) -> KillBatchResult {
        kill_batch(self.services.executor(), ids, None)
    }

    fn table_columns(&self) -> &'static [TableColumn] {
        &PORT_COLUMNS
    }

    fn query_options(&self) -> &'static [(&'static str, &'static str)] {
        QUERY_OPTIONS
    }

    fn table_rows(&self, records: &[PortRecord]) -> Vec<TableRow> {
        records
            .iter()
            .map(|port| {
                TableRow::new()
                    .cell("id", &port.pid)
                    .cell("port", &port.port)
                    .cell("pid", &port.pid)
                    .cell("protocol", &port.protocol)
                    .cell("localAddress", &port.local_address)
                    .cell("remoteAddress", or_dash(&port.remote_address))
                    .cell("state", or_dash(&port.state))
                    .cell("processName", port.display_process_name())
            })
            .collect()
    }

    fn is_ready(&self) -> bool {
        self.services.is_ready()
    }

    fn system_info(&self) -> SystemInfo {
        self.services.system_info()
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
