//! # Storage Workspace
//!
//! Entry point for hosts: turns a [`StorageConfig`] into a set of drivers and
//! routes `type://path` style paths to the right one.
//!
//! ## Feature Flags
//!
//! - `gdrive`: Google Drive driver (default)
//! - `desktop-shims`: reqwest-backed HTTP pool helper (default)
//!
//! ## Usage
//!
//! ```ignore
//! use storage_workspace::{desktop_pool, DriverRegistry, StorageConfig};
//!
//! let config = StorageConfig::from_file("storage.json")?;
//! let registry = DriverRegistry::from_config(desktop_pool(&config)?, &config)?;
//!
//! for path in registry.glob("gdrive://reports/*", false).await? {
//!     let data = registry.get(&path).await?;
//! }
//! ```

pub mod registry;

pub use bridge_traits::{BridgeError, CustomHeaderDriver, Driver, HttpPool};
pub use core_runtime::config::StorageConfig;
pub use registry::DriverRegistry;

#[cfg(feature = "desktop-shims")]
pub use registry::desktop_pool;
