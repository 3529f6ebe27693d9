//! # Google Drive Provider
//!
//! Read-only storage driver for a Google-Drive-style HTTP API.
//!
//! ## Overview
//!
//! This module provides:
//! - Bearer token + application key authentication ([`AuthContext`])
//! - Single object downloads verified against the server-declared size
//! - Cursor-paginated listings filtered down to file entries
//! - The [`GoogleDriveDriver`] facade implementing the generic
//!   `Driver`/`CustomHeaderDriver` contracts
//!
//! Writes are rejected, and nothing is retried or cached.

pub mod auth;
pub mod config;
pub mod connector;
pub mod error;
pub mod fetch;
pub mod list;
pub mod types;

pub use auth::AuthContext;
pub use config::GoogleDriveConfig;
pub use connector::{GoogleDriveDriver, DRIVER_TYPE};
pub use error::{GoogleDriveError, Result};
