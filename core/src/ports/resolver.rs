//! Process name resolver port (interface).

/// Port for looking up a process name by PID.
///
/// Lookups are best-effort: `None` means "could not resolve" and never
/// aborts the parse that asked.
pub trait ProcessNameResolver: Send + Sync {
    fn resolve(&self, pid: &str) -> Option<String>;
}
