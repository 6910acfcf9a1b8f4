//! Domain layer - Pure data models.
//!
//! These types have no I/O dependencies and can be tested in isolation.

mod columns;
mod kill;
mod numeric;
mod platform;
mod port;
mod process;

// Re-export all domain types
pub use columns::{
    ColumnAlign, ColumnType, TableColumn, TableRow, PORT_COLUMNS, PROCESS_COLUMNS,
};
pub use kill::{KillBatchResult, KillOutcome, KillStatus, KillSummary, NO_SELECTION_MESSAGE};
pub use numeric::{is_decimal, parse_integer};
pub use platform::{supported_platforms, Platform};
pub use port::{PortRecord, UNKNOWN_PROCESS};
pub use process::{ProcessRecord, DEFAULT_STATUS};
