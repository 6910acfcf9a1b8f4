//! Output parsers for the platform inspection tools.
//!
//! Parsers are purely syntactic: they pick fields out of each line and leave
//! canonicalization to the formatter. Lines that do not match a tool's layout
//! are skipped; the only error a parser raises is for an unsupported platform.

mod darwin;
mod linux;
mod ps;
mod utils;
mod windows;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Platform, PortRecord, ProcessRecord, UNKNOWN_PROCESS};
use crate::error::{Error, Result};
use crate::ports::ProcessNameResolver;

pub use utils::{decode_lsof_escapes, split_csv_line, trailing_port};

/// Parser for one OS family's tool output.
#[derive(Clone)]
pub struct OutputParser {
    os: String,
    platform: Option<Platform>,
    resolver: Option<Arc<dyn ProcessNameResolver>>,
    cache_lookups: bool,
}

impl OutputParser {
    /// Create a parser for an OS identifier (`windows`, `macos`, `linux`).
    ///
    /// Any other identifier is accepted here and rejected by every parse call.
    pub fn new(os: impl Into<String>) -> Self {
        let os = os.into();
        let platform = os.parse().ok();
        Self {
            os,
            platform,
            resolver: None,
            cache_lookups: false,
        }
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self::new(platform.as_str())
    }

    /// Resolver used for netstat rows, which carry a PID but no process name.
    pub fn with_resolver(mut self, resolver: Arc<dyn ProcessNameResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Memoize resolver answers per PID within one parse call.
    pub fn with_lookup_cache(mut self, enabled: bool) -> Self {
        self.cache_lookups = enabled;
        self
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn platform(&self) -> Result<Platform> {
        self.platform
            .ok_or_else(|| Error::UnsupportedPlatform(self.os.clone()))
    }

    pub fn is_supported(&self) -> bool {
        self.platform.is_some()
    }

    /// Parse port listing output (`netstat`, `lsof` or `ss` by platform).
    pub fn parse_port_output<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<PortRecord>> {
        let platform = self.platform()?;
        let lines = lines.iter().map(|line| line.as_ref());

        let ports = match platform {
            Platform::Windows => {
                let mut names = NameLookup::new(self.resolver.as_deref(), self.cache_lookups);
                windows::parse_netstat(lines, &mut names)
            }
            Platform::MacOs => darwin::parse_lsof(lines),
            Platform::Linux => linux::parse_ss(lines),
        };

        debug!(platform = %platform, count = ports.len(), "Parsed port output");
        Ok(ports)
    }

    /// Parse process listing output (`tasklist` or `ps` by platform).
    pub fn parse_process_output<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<ProcessRecord>> {
        let platform = self.platform()?;
        let lines = lines.iter().map(|line| line.as_ref());

        let processes = match platform {
            Platform::Windows => windows::parse_tasklist(lines),
            Platform::MacOs | Platform::Linux => ps::parse_ps(lines),
        };

        debug!(platform = %platform, count = processes.len(), "Parsed process output");
        Ok(processes)
    }
}

impl std::fmt::Debug for OutputParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputParser")
            .field("os", &self.os)
            .field("resolves_names", &self.resolver.is_some())
            .field("cache_lookups", &self.cache_lookups)
            .finish()
    }
}

/// Best-effort PID to name lookup for one parse call.
pub(crate) struct NameLookup<'a> {
    resolver: Option<&'a dyn ProcessNameResolver>,
    cache: Option<HashMap<String, String>>,
}

impl<'a> NameLookup<'a> {
    pub(crate) fn new(resolver: Option<&'a dyn ProcessNameResolver>, cache: bool) -> Self {
        Self {
            resolver,
            cache: cache.then(HashMap::new),
        }
    }

    /// Name for `pid`, "Unknown" when unresolved.
    pub(crate) fn name_for(&mut self, pid: &str) -> String {
        let Some(resolver) = self.resolver else {
            return UNKNOWN_PROCESS.to_string();
        };

        if let Some(name) = self.cache.as_ref().and_then(|cache| cache.get(pid)) {
            return name.clone();
        }

        let name = resolver.resolve(pid).unwrap_or_else(|| {
            debug!(pid, "Process name unresolved");
            UNKNOWN_PROCESS.to_string()
        });

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(pid.to_string(), name.clone());
        }
        name
    }
}
