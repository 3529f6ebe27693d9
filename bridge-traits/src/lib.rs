//! # Host Bridge Traits
//!
//! Contracts shared between storage drivers and the hosts that run them.
//!
//! ## Overview
//!
//! - [`HttpClient`](http::HttpClient) - one request per call, no retry
//! - [`HttpPool`](pool::HttpPool) - scoped, bounded access to a shared client
//! - [`Driver`](driver::Driver) / [`CustomHeaderDriver`](driver::CustomHeaderDriver) -
//!   the uniform read/list/write surface every backend implements
//! - [`path`] - type-prefix and sanitization helpers
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Drivers
//! keep their own richer error enums internally and convert at this boundary.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` so that one driver can serve concurrent
//! callers sharing a single pool.

pub mod driver;
pub mod error;
pub mod http;
pub mod path;
pub mod pool;

pub use error::BridgeError;

// Re-export commonly used types
pub use driver::{CustomHeaderDriver, Driver};
pub use http::{Headers, HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use pool::{HttpPool, PooledClient};
