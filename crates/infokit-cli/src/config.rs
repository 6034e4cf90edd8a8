use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// CLI configuration: defaults, then an optional TOML file, then `INFOKIT_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device node prefix the scanner appends indices to (default: /dev/video).
    pub device_prefix: String,
    /// Unopenable ports in a row before the scan stops.
    pub max_failures: u32,
    /// Fractional digits in formatted durations.
    pub decimals: usize,
    /// Program that prints the video library build information.
    pub build_info_cmd: String,
    pub build_info_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_prefix: "/dev/video".to_string(),
            max_failures: 6,
            decimals: infokit_core::DEFAULT_DECIMALS,
            build_info_cmd: "opencv_version".to_string(),
            build_info_args: vec!["--verbose".to_string()],
        }
    }
}

impl Config {
    /// Load from `$INFOKIT_CONFIG` (if set) and the environment.
    pub fn load() -> Result<Self> {
        let base = match std::env::var("INFOKIT_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Apply `INFOKIT_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse leave the current setting in place.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("INFOKIT_DEVICE_PREFIX") {
            self.device_prefix = v;
        }
        if let Some(v) = lookup("INFOKIT_MAX_FAILURES").and_then(|v| v.parse().ok()) {
            self.max_failures = v;
        }
        if let Some(v) = lookup("INFOKIT_DECIMALS").and_then(|v| v.parse().ok()) {
            self.decimals = v;
        }
        if let Some(v) = lookup("INFOKIT_BUILD_INFO_CMD") {
            self.build_info_cmd = v;
        }
        if let Some(v) = lookup("INFOKIT_BUILD_INFO_ARGS") {
            self.build_info_args = v.split_whitespace().map(str::to_string).collect();
        }
        self
    }
}
