//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the storage drivers:
//! - Logging and tracing infrastructure
//! - Storage configuration loading
//!
//! ## Overview
//!
//! Drivers depend on this crate for their logging conventions and for the
//! configuration document they are constructed from. Nothing here performs
//! I/O beyond reading a configuration file.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
