//! Driver lookup by path type

use bridge_traits::error::{BridgeError, Result};
use bridge_traits::path::get_type;
use bridge_traits::{Driver, HttpPool};
use bytes::Bytes;
use core_runtime::config::StorageConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drivers keyed by the type prefix they serve
#[derive(Default)]
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate every known driver section of `config`.
    ///
    /// Unknown driver types are skipped with a warning; a known section
    /// that fails validation is an error.
    pub fn from_config(pool: Arc<HttpPool>, config: &StorageConfig) -> Result<Self> {
        let mut registry = Self::new();

        for (driver_type, section) in &config.drivers {
            match driver_type.as_str() {
                #[cfg(feature = "gdrive")]
                provider_google_drive::DRIVER_TYPE => {
                    let driver =
                        provider_google_drive::GoogleDriveDriver::create(Arc::clone(&pool), section)?;
                    registry.register(Arc::new(driver));
                }
                other => {
                    warn!(driver_type = %other, "Skipping unknown driver section");
                }
            }
        }

        info!(drivers = registry.drivers.len(), "Driver registry ready");
        Ok(registry)
    }

    /// Add a driver, replacing any previous one of the same type
    pub fn register(&mut self, driver: Arc<dyn Driver>) {
        debug!(driver_type = %driver.type_name(), "Registering driver");
        self.drivers.insert(driver.type_name().to_string(), driver);
    }

    pub fn contains(&self, driver_type: &str) -> bool {
        self.drivers.contains_key(driver_type)
    }

    /// Driver responsible for `path`
    pub fn driver_for(&self, path: &str) -> Result<&Arc<dyn Driver>> {
        let driver_type = get_type(path);
        self.drivers.get(driver_type).ok_or_else(|| {
            BridgeError::NotAvailable(format!("No driver registered for type '{}'", driver_type))
        })
    }

    pub async fn try_get(&self, path: &str) -> Result<Option<Bytes>> {
        self.driver_for(path)?.try_get(path).await
    }

    pub async fn get(&self, path: &str) -> Result<Bytes> {
        self.driver_for(path)?.get(path).await
    }

    pub async fn put(&self, path: &str, data: Bytes) -> Result<()> {
        self.driver_for(path)?.put(path, data).await
    }

    pub async fn glob(&self, path: &str, verbose: bool) -> Result<Vec<String>> {
        self.driver_for(path)?.glob(path, verbose).await
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("DriverRegistry").field("drivers", &types).finish()
    }
}

/// Build an HTTP pool backed by reqwest, sized from `config.http`
#[cfg(feature = "desktop-shims")]
pub fn desktop_pool(config: &StorageConfig) -> Result<Arc<HttpPool>> {
    let client = bridge_desktop::ReqwestHttpClient::with_timeout(config.http.timeout())?;
    Ok(Arc::new(HttpPool::new(
        Arc::new(client),
        config.http.max_connections,
    )))
}

#[cfg(all(test, feature = "gdrive"))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
    use mockall::mock;
    use serde_json::json;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
        }
    }

    fn pool(mock_http: MockHttpClient) -> Arc<HttpPool> {
        Arc::new(HttpPool::new(Arc::new(mock_http), 1))
    }

    fn config() -> StorageConfig {
        StorageConfig::builder()
            .driver("gdrive", json!({ "token": "t", "app": "a" }))
            .driver("s3", json!({ "region": "x" }))
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_config_registers_known_drivers() {
        let registry = DriverRegistry::from_config(pool(MockHttpClient::new()), &config()).unwrap();

        assert!(registry.contains("gdrive"));
        assert!(!registry.contains("s3"));
        assert_eq!(format!("{:?}", registry), "DriverRegistry { drivers: [\"gdrive\"] }");
    }

    #[test]
    fn test_from_config_rejects_invalid_section() {
        let config = StorageConfig::builder()
            .driver("gdrive", json!({ "token": "t" }))
            .build()
            .unwrap();

        let result = DriverRegistry::from_config(pool(MockHttpClient::new()), &config);
        match result {
            Err(BridgeError::OperationFailed(msg)) => assert!(msg.contains("'app'")),
            other => panic!("expected configuration failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_routes_by_type() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req.url.contains("key=a"));
            Ok(HttpResponse {
                status: 200,
                headers: Default::default(),
                body: Bytes::from(
                    json!({
                        "entries": [{ ".tag": "file", "path_lower": "/docs/a.txt" }],
                        "has_more": false
                    })
                    .to_string(),
                ),
            })
        });

        let registry = DriverRegistry::from_config(pool(mock_http), &config()).unwrap();
        let files = registry.glob("gdrive://docs/*", false).await.unwrap();

        assert_eq!(files, vec!["gdrive://docs/a.txt"]);
    }

    #[tokio::test]
    async fn test_unknown_type_not_available() {
        let registry = DriverRegistry::from_config(pool(MockHttpClient::new()), &config()).unwrap();

        assert!(matches!(
            registry.get("s3://bucket/key").await,
            Err(BridgeError::NotAvailable(_))
        ));
        assert!(matches!(
            registry.glob("/local/dir/*", false).await,
            Err(BridgeError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_put_routes_to_driver() {
        let registry = DriverRegistry::from_config(pool(MockHttpClient::new()), &config()).unwrap();

        assert!(matches!(
            registry.put("gdrive://a.txt", Bytes::from_static(b"x")).await,
            Err(BridgeError::Unsupported(_))
        ));
    }
}
