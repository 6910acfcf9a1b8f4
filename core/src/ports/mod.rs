//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the seams the pipeline uses to reach the outside
//! world. Implementations live in `adapters`; tests substitute their own.

mod manager;
mod resolver;
mod shell;

pub use manager::{HostManager, SystemInfo};
pub use resolver::ProcessNameResolver;
pub use shell::{ShellOutput, ShellPort};
