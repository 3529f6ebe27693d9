//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest`
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use bridge_traits::HttpPool;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> bridge_traits::error::Result<()> {
//!     let http_client = Arc::new(ReqwestHttpClient::new()?);
//!     let pool = HttpPool::new(http_client, 8);
//!     // Hand the pool to drivers
//!     Ok(())
//! }
//! ```

mod http;

pub use http::ReqwestHttpClient;
