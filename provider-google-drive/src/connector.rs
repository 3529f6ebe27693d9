//! Google Drive driver
//!
//! Implements the generic [`Driver`] contract on top of [`ObjectFetcher`]
//! and [`DirectoryLister`].

use async_trait::async_trait;
use bridge_traits::driver::{CustomHeaderDriver, Driver};
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::Headers;
use bridge_traits::path::strip_type;
use bridge_traits::pool::HttpPool;
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::auth::AuthContext;
use crate::config::{Endpoints, GoogleDriveConfig};
use crate::error::{GoogleDriveError, Result};
use crate::fetch::ObjectFetcher;
use crate::list::DirectoryLister;

/// Scheme identifier of this driver
pub const DRIVER_TYPE: &str = "gdrive";

/// Google Drive driver
///
/// Read-only: objects can be fetched and listed, `put` always fails.
///
/// # Example
///
/// ```ignore
/// use provider_google_drive::GoogleDriveDriver;
/// use bridge_traits::Driver;
///
/// let driver = GoogleDriveDriver::create(pool, &serde_json::json!({
///     "token": token,
///     "app": app_key,
/// }))?;
/// let files = driver.glob("gdrive://music/*", false).await?;
/// ```
pub struct GoogleDriveDriver {
    /// Shared HTTP pool; one handle is borrowed per request
    pool: Arc<HttpPool>,

    auth: AuthContext,

    endpoints: Endpoints,

    max_pages: Option<usize>,
}

impl GoogleDriveDriver {
    /// Create a driver against the public API endpoints
    pub fn new(pool: Arc<HttpPool>, auth: AuthContext) -> Self {
        Self {
            pool,
            auth,
            endpoints: Endpoints::default(),
            max_pages: None,
        }
    }

    /// Create a driver from a parsed configuration section
    pub fn with_config(pool: Arc<HttpPool>, config: GoogleDriveConfig) -> Self {
        Self {
            pool,
            auth: AuthContext::new(config.token, config.app),
            endpoints: config.endpoints,
            max_pages: config.max_pages,
        }
    }

    /// Create a driver from a raw `gdrive` configuration section.
    ///
    /// Fails when `token` or `app` is missing.
    pub fn create(pool: Arc<HttpPool>, json: &Value) -> Result<Self> {
        let config = GoogleDriveConfig::from_json(json)?;
        info!(
            max_pages = ?config.max_pages,
            api = %config.endpoints.list,
            "Creating Google Drive driver"
        );
        Ok(Self::with_config(pool, config))
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    fn fetcher(&self) -> ObjectFetcher<'_> {
        ObjectFetcher::new(&self.pool, &self.auth, &self.endpoints.get)
    }

    fn lister(&self) -> DirectoryLister<'_> {
        DirectoryLister::new(&self.pool, &self.auth, &self.endpoints, DRIVER_TYPE)
            .with_max_pages(self.max_pages)
    }

    /// Fetch an object; a missing size declaration is reported as `Ok(None)`
    pub async fn fetch(&self, path: &str) -> Result<Option<Bytes>> {
        self.fetcher().fetch(strip_type(path), Headers::new()).await
    }

    /// Fetch an object with extra headers; a miss is an error naming `path`
    #[instrument(skip(self, headers), fields(path = %path))]
    pub async fn fetch_binary(&self, path: &str, headers: Headers) -> Result<Bytes> {
        self.fetcher()
            .fetch(strip_type(path), headers)
            .await?
            .ok_or_else(|| GoogleDriveError::NotFound {
                path: path.to_string(),
            })
    }

    /// Same as [`fetch_binary`](Self::fetch_binary), decoded as text
    pub async fn fetch_string(&self, path: &str, headers: Headers) -> Result<String> {
        let data = self.fetch_binary(path, headers).await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// List file paths under a wildcard path
    pub async fn list(&self, path: &str, verbose: bool) -> Result<Vec<String>> {
        self.lister().list(strip_type(path), verbose).await
    }

    /// Writing is not supported by this driver
    pub fn store(&self, path: &str, data: &[u8]) -> Result<()> {
        debug!(path = %path, bytes = data.len(), "Rejecting write");
        Err(GoogleDriveError::UnsupportedOperation {
            operation: "PUT",
            driver: DRIVER_TYPE,
        })
    }
}

impl std::fmt::Debug for GoogleDriveDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleDriveDriver")
            .field("pool", &self.pool)
            .field("auth", &self.auth)
            .field("endpoints", &self.endpoints)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

#[async_trait]
impl Driver for GoogleDriveDriver {
    fn type_name(&self) -> &str {
        DRIVER_TYPE
    }

    async fn try_get(&self, path: &str) -> BridgeResult<Option<Bytes>> {
        Ok(self.fetch(path).await?)
    }

    async fn get(&self, path: &str) -> BridgeResult<Bytes> {
        Ok(self.fetch_binary(path, Headers::new()).await?)
    }

    async fn put(&self, path: &str, data: Bytes) -> BridgeResult<()> {
        Ok(self.store(path, &data)?)
    }

    async fn glob(&self, path: &str, verbose: bool) -> BridgeResult<Vec<String>> {
        Ok(self.list(path, verbose).await?)
    }
}

#[async_trait]
impl CustomHeaderDriver for GoogleDriveDriver {
    async fn get_with_headers(&self, path: &str, headers: Headers) -> BridgeResult<String> {
        Ok(self.fetch_string(path, headers).await?)
    }

    async fn get_binary(&self, path: &str, headers: Headers) -> BridgeResult<Bytes> {
        Ok(self.fetch_binary(path, headers).await?)
    }
}
