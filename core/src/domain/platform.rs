//! Operating system family detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The OS families whose inspection tools we know how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::MacOs, Platform::Linux];

    /// Detect the platform of the running host.
    ///
    /// Unrecognized Unix-like kernels fall back to the Linux command set.
    pub fn detect() -> Self {
        Self::from_os_family(std::env::consts::OS)
    }

    /// Map an OS family name (as reported by `std::env::consts::OS` or `uname`)
    /// onto a platform. Never fails.
    pub fn from_os_family(os: &str) -> Self {
        match os.to_lowercase().as_str() {
            "windows" => Platform::Windows,
            "macos" | "darwin" => Platform::MacOs,
            _ => Platform::Linux,
        }
    }

    /// Identifier used in diagnostics and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        }
    }

    /// External tools that must be on `PATH` for this platform.
    pub fn required_tools(&self) -> &'static [&'static str] {
        match self {
            Platform::Windows => &["netstat", "tasklist", "taskkill"],
            Platform::MacOs => &["lsof", "ps", "kill"],
            Platform::Linux => &["ss", "ps", "kill"],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    /// Strict parse: only the three supported identifiers are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "macos" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// Identifiers of every supported platform.
pub fn supported_platforms() -> Vec<&'static str> {
    Platform::ALL.iter().map(Platform::as_str).collect()
}
