//! Configuration for the pada-detect daemon
//!
//! Loaded from a TOML file. Every section and field has a default, so a
//! partial file (or none at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::detection::DetectorConfig;
use crate::error::Result;
use crate::io::wire::WireFormat;
use crate::publication::PublicationConfig;

/// Files tried when no config path is given, in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["pada-detect.toml", "/etc/pada-detect.toml"];

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub detector: DetectorConfig,
    pub sanitizer: SanitizerConfig,
    pub publication: PublicationConfig,
    pub topics: TopicsConfig,
    pub logging: LoggingConfig,
}

/// Inbound scan source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// UDP bind address for inbound scans
    ///
    /// Examples:
    /// - `0.0.0.0:5560` - All interfaces
    /// - `127.0.0.1:5560` - Localhost only
    pub bind_address: String,
    /// Inbound wire format
    pub wire_format: WireFormat,
    /// Wait for a scan before re-checking for shutdown (milliseconds)
    pub poll_timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5560".to_string(),
            wire_format: WireFormat::Json,
            poll_timeout_ms: 100,
        }
    }
}

impl SourceConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

/// Range sanitizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Jitter RNG seed (0 = seed from entropy)
    pub seed: u64,
}

/// Output topic names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    pub marker: String,
    pub text: String,
    pub people: String,
    pub measurements: String,
    pub scan_markers: String,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            marker: "visualization_marker".to_string(),
            text: "laser_person".to_string(),
            people: "/leg_persons".to_string(),
            measurements: "people_tracker_measurements".to_string(),
            scan_markers: "visualization_scan".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins if set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from `path` if given, else from the first readable default path,
    /// else built-in defaults.
    ///
    /// An explicit path must exist and parse. A default path that exists but
    /// does not parse is an error too.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = path {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in DEFAULT_CONFIG_PATHS {
            let candidate = Path::new(candidate);
            if candidate.is_file() {
                return Ok((Self::from_file(candidate)?, Some(candidate.to_path_buf())));
            }
        }

        Ok((Self::default(), None))
    }
}
