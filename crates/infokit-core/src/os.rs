//! Host operating system detection.

use std::fmt;

/// Host OS, named the way `uname -s` reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsKind {
    Linux,
    Darwin,
    Windows,
    FreeBsd,
    /// Anything else, carrying the raw name.
    Other(String),
}

impl OsKind {
    /// Classify a `uname` sysname string (e.g. "Linux", "Darwin").
    pub fn from_sysname(name: &str) -> Self {
        match name {
            "Linux" => Self::Linux,
            "Darwin" => Self::Darwin,
            "Windows" | "Windows_NT" => Self::Windows,
            "FreeBSD" => Self::FreeBsd,
            other => Self::Other(other.to_string()),
        }
    }

    /// Map a Rust target OS string (`std::env::consts::OS`) to its sysname form.
    pub fn from_target(target: &str) -> Self {
        match target {
            "linux" | "android" => Self::Linux,
            "macos" | "ios" => Self::Darwin,
            "windows" => Self::Windows,
            "freebsd" => Self::FreeBsd,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::Windows => "Windows",
            Self::FreeBsd => "FreeBSD",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report the host operating system.
///
/// Uses the `uname(2)` sysname on Unix, falling back to the compile-time
/// target OS when the call fails or the platform has no `uname`.
pub fn current_os() -> OsKind {
    match uname_sysname() {
        Some(name) if !name.is_empty() => OsKind::from_sysname(&name),
        _ => OsKind::from_target(std::env::consts::OS),
    }
}

#[cfg(unix)]
fn uname_sysname() -> Option<String> {
    match nix::sys::utsname::uname() {
        Ok(uts) => Some(uts.sysname().to_string_lossy().into_owned()),
        Err(e) => {
            tracing::debug!(error = %e, "uname failed, using target OS");
            None
        }
    }
}

#[cfg(not(unix))]
fn uname_sysname() -> Option<String> {
    None
}
