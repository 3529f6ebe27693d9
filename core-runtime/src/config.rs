//! # Storage Configuration
//!
//! Loads the JSON document drivers are constructed from.
//!
//! ## Overview
//!
//! The document is a single JSON object. The reserved `http` key tunes the
//! shared HTTP pool; every other top-level key is a driver section keyed by
//! driver type:
//!
//! ```json
//! {
//!     "http": { "max_connections": 8, "timeout_secs": 30 },
//!     "gdrive": { "token": "...", "app": "..." }
//! }
//! ```
//!
//! Driver sections are kept as raw [`serde_json::Value`]s; each driver
//! validates its own section when it is created.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::StorageConfig;
//!
//! let config = StorageConfig::from_file("/etc/storage.json")?;
//! let gdrive = config.driver_section("gdrive");
//! ```
//!
//! Or programmatically:
//!
//! ```ignore
//! let config = StorageConfig::builder()
//!     .max_connections(4)
//!     .driver("gdrive", serde_json::json!({ "token": "t", "app": "a" }))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Key reserved for HTTP pool settings
pub const HTTP_SECTION: &str = "http";

const DEFAULT_MAX_CONNECTIONS: usize = 8;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared HTTP pool settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Upper bound on requests in flight across all drivers
    pub max_connections: usize,

    /// Per-request transport timeout
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parsed storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub http: HttpSettings,

    /// Driver sections keyed by driver type
    #[serde(flatten)]
    pub drivers: Map<String, Value>,
}

impl StorageConfig {
    /// Creates a new builder for constructing a `StorageConfig`.
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::default()
    }

    /// Parse a configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse configuration: {}", e)))?;
        Self::from_value(value)
    }

    /// Build from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Config(
                "Configuration root must be a JSON object".to_string(),
            ));
        }

        let config: StorageConfig = serde_json::from_value(value)
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            drivers = config.drivers.len(),
            "Loaded storage configuration"
        );
        Ok(config)
    }

    /// Section for driver `driver_type`, if configured
    pub fn driver_section(&self, driver_type: &str) -> Option<&Value> {
        self.drivers.get(driver_type)
    }

    /// Configured driver types
    pub fn driver_types(&self) -> impl Iterator<Item = &str> {
        self.drivers.keys().map(String::as_str)
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.http.max_connections == 0 {
            return Err(Error::Config(
                "http.max_connections must be greater than 0".to_string(),
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::Config(
                "http.timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (driver_type, section) in &self.drivers {
            if !section.is_object() {
                return Err(Error::Config(format!(
                    "Driver section '{}' must be a JSON object",
                    driver_type
                )));
            }
        }

        Ok(())
    }
}

/// Builder for [`StorageConfig`]
#[derive(Debug, Default)]
pub struct StorageConfigBuilder {
    http: HttpSettings,
    drivers: Map<String, Value>,
}

impl StorageConfigBuilder {
    /// Sets the maximum number of concurrent requests
    pub fn max_connections(mut self, max_connections: usize) -> Self {
        self.http.max_connections = max_connections;
        self
    }

    /// Sets the per-request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.http.timeout_secs = timeout_secs;
        self
    }

    /// Adds or replaces a driver section
    pub fn driver(mut self, driver_type: impl Into<String>, section: Value) -> Self {
        self.drivers.insert(driver_type.into(), section);
        self
    }

    /// Validates and builds the configuration
    pub fn build(self) -> Result<StorageConfig> {
        if self.drivers.contains_key(HTTP_SECTION) {
            return Err(Error::Config(format!(
                "'{}' is reserved and cannot name a driver",
                HTTP_SECTION
            )));
        }

        let config = StorageConfig {
            http: self.http,
            drivers: self.drivers,
        };
        config.validate()?;
        Ok(config)
    }
}
