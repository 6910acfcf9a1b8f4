//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.

mod resolver;
mod shell;

// Re-export main types for convenience
pub use resolver::ShellNameResolver;
pub use shell::SystemShell;
