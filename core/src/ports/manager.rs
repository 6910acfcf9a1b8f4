//! Record manager port (interface).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{KillBatchResult, TableColumn, TableRow};
use crate::error::Result;

/// Diagnostic snapshot of a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub operating_system: String,
    pub available_commands: BTreeMap<&'static str, &'static str>,
    pub service_ready: bool,
}

/// Interface a presentation layer drives, one implementation per record kind.
pub trait HostManager {
    /// The record type this manager lists.
    type Record;

    /// Human-readable manager name.
    fn display_name(&self) -> &'static str;

    /// Validate `input`, run the listing command, and return normalized,
    /// validated, sorted records. An empty input lists everything.
    fn query(&self, input: &str) -> Result<Vec<Self::Record>>;

    /// Kill every identifier in order; per-target failures are data, never errors.
    fn kill_selected(&self, ids: &[String]) -> KillBatchResult;

    /// Static column metadata for tables of this record kind.
    fn table_columns(&self) -> &'static [TableColumn];

    /// Query modes offered to the user, as (key, description).
    fn query_options(&self) -> &'static [(&'static str, &'static str)];

    /// Project records into display rows.
    fn table_rows(&self, records: &[Self::Record]) -> Vec<TableRow>;

    /// Required tools are present and the platform is supported.
    fn is_ready(&self) -> bool;

    fn system_info(&self) -> SystemInfo;
}
