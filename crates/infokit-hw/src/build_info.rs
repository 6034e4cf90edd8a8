//! Video library build-information inspection.
//!
//! OpenCV prints a multi-line dump of how it was compiled
//! (`opencv_version --verbose`). Optional backends show up as lines such as
//! `    GStreamer:                   YES (1.22.0)`.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Marker that must share a line with a feature name for it to count as built in.
const ENABLED_MARKER: &str = "YES";

#[derive(Debug, Error)]
pub enum BuildInfoError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("build information is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// True if some line of `info` contains both `marker` and `YES`.
///
/// Both checks are case-sensitive substring matches and may appear anywhere
/// on the line, in any order.
pub fn has_enabled_feature(info: &str, marker: &str) -> bool {
    info.lines()
        .any(|line| line.contains(marker) && line.contains(ENABLED_MARKER))
}

/// An owned build-information dump.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    text: String,
}

impl BuildInfo {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Capture the stdout of `program args...`.
    pub fn from_command<I, S>(program: &str, args: I) -> Result<Self, BuildInfoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| BuildInfoError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(BuildInfoError::Exit {
                program: program.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout)?;
        tracing::debug!(program, bytes = text.len(), "captured build information");
        Ok(Self { text })
    }

    /// Read a saved dump from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BuildInfoError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BuildInfoError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn feature_enabled(&self, marker: &str) -> bool {
        has_enabled_feature(&self.text, marker)
    }

    /// Whether the library was compiled with the GStreamer backend.
    pub fn built_with_gstreamer(&self) -> bool {
        self.feature_enabled("GStreamer")
    }

    /// `key: value` lines, both sides trimmed. Section headers with an empty
    /// value are included; lines without a colon are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.text.lines().filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key, value.trim()))
        })
    }
}
