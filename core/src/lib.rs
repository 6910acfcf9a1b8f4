//! Hostscope Core Library
//!
//! Cross-platform inspection of listening ports and running processes.
//! Provides functionality to:
//! - Build and run the platform's inspection commands
//! - Parse `netstat`, `lsof`, `ss`, `tasklist` and `ps` output
//! - Normalize, validate and sort the resulting records
//! - Kill processes in batches with per-target outcomes
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Query and kill managers
//!
//! The pipeline between them lives in `commands`, `executor`, `parser`,
//! `formatter` and `validator`.
//!
//! # Platform Support
//! - Windows: `netstat`, `tasklist`, `taskkill`
//! - macOS: `lsof`, `ps`, `kill`
//! - Linux: `ss`, `ps`, `kill`

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Pipeline
pub mod commands;
pub mod executor;
pub mod formatter;
pub mod parser;
pub mod validator;

pub mod config;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{
    supported_platforms, KillBatchResult, KillOutcome, KillStatus, KillSummary, Platform,
    PortRecord, ProcessRecord, TableColumn, TableRow,
};

// Re-export other commonly used types
pub use application::{HostServices, PortManager, ProcessManager};
pub use config::{Config, ConfigStore};
pub use error::{Error, Result};
pub use executor::CommandExecutor;
pub use formatter::{format_for_table_display, DataFormatter};
pub use parser::OutputParser;
pub use ports::{HostManager, SystemInfo};
