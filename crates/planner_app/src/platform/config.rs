use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use planner_engine::FetchSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "planner.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Origin serving `/plan`.
    pub backend_url: String,
    /// Page location the session starts from, e.g. `/?target=gear`.
    pub initial_location: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            backend_url: "http://127.0.0.1:8000/".to_string(),
            initial_location: "/".to_string(),
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            max_response_bytes: fetch.max_bytes,
            log_destination: LogDestination::default(),
        }
    }
}

impl ControllerConfig {
    /// Reads the configuration at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: self.request_timeout(),
            max_bytes: self.max_response_bytes,
            ..FetchSettings::default()
        }
    }
}
