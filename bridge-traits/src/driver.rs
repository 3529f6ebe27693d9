//! Generic driver contract
//!
//! Every storage backend (local disk, plain HTTP, cloud drives) implements
//! [`Driver`]. Backends that accept caller-provided request headers on
//! direct reads additionally implement [`CustomHeaderDriver`].

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{BridgeError, Result};
use crate::http::Headers;

/// Read/list/write access to one kind of storage location
///
/// # Example
///
/// ```ignore
/// use bridge_traits::driver::Driver;
///
/// async fn dump(driver: &dyn Driver) -> Result<()> {
///     for path in driver.glob("gdrive://data/*", false).await? {
///         let bytes = driver.get(&path).await?;
///         println!("{}: {} bytes", path, bytes.len());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Driver: Send + Sync {
    /// Short identifier used as the path scheme, e.g. `"gdrive"`
    fn type_name(&self) -> &str;

    /// Fetch an object, reporting a soft miss as `Ok(None)`
    async fn try_get(&self, path: &str) -> Result<Option<Bytes>>;

    /// Fetch an object; a miss is an error naming `path`
    async fn get(&self, path: &str) -> Result<Bytes> {
        self.try_get(path)
            .await?
            .ok_or_else(|| BridgeError::NotFound(format!("Couldn't {} GET {}", self.type_name(), path)))
    }

    /// Store an object
    async fn put(&self, path: &str, data: Bytes) -> Result<()>;

    /// List objects under a wildcard path such as `dir/*`
    async fn glob(&self, path: &str, verbose: bool) -> Result<Vec<String>>;
}

/// Drivers whose direct reads accept extra request headers
#[async_trait]
pub trait CustomHeaderDriver: Driver {
    /// Fetch an object as text, merging `headers` over the defaults
    async fn get_with_headers(&self, path: &str, headers: Headers) -> Result<String>;

    /// Fetch an object as bytes, merging `headers` over the defaults
    async fn get_binary(&self, path: &str, headers: Headers) -> Result<Bytes>;
}
