//! Scoped HTTP client pool
//!
//! Drivers never own a transport. They borrow one [`PooledClient`] per
//! request from a shared [`HttpPool`]; the handle gives its slot back when
//! dropped, whichever way the caller leaves.

use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::trace;

use crate::error::{BridgeError, Result};
use crate::http::{Headers, HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Pool of HTTP handles bounded by `max_connections` concurrent requests
pub struct HttpPool {
    client: Arc<dyn HttpClient>,
    permits: Arc<Semaphore>,
    max_connections: usize,
}

impl HttpPool {
    /// Create a pool over `client` allowing `max_connections` requests in flight.
    ///
    /// A value of zero is raised to one.
    pub fn new(client: Arc<dyn HttpClient>, max_connections: usize) -> Self {
        let max_connections = max_connections.max(1);
        Self {
            client,
            permits: Arc::new(Semaphore::new(max_connections)),
            max_connections,
        }
    }

    /// Wait for a free slot and hand out a scoped client
    pub async fn acquire(&self) -> Result<PooledClient> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| BridgeError::NotAvailable("HTTP pool is closed".to_string()))?;

        trace!(available = self.permits.available_permits(), "Acquired pooled client");

        Ok(PooledClient {
            client: Arc::clone(&self.client),
            _permit: permit,
        })
    }

    /// Number of handles that can be acquired right now
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }
}

impl std::fmt::Debug for HttpPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPool")
            .field("client", &"HttpClient { ... }")
            .field("max_connections", &self.max_connections)
            .field("available", &self.available())
            .finish()
    }
}

/// One borrowed slot of an [`HttpPool`]
pub struct PooledClient {
    client: Arc<dyn HttpClient>,
    _permit: OwnedSemaphorePermit,
}

impl PooledClient {
    pub async fn get(&self, url: impl Into<String>, headers: Headers) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Get, url).headers(headers);
        self.client.execute(request).await
    }

    pub async fn post(
        &self,
        url: impl Into<String>,
        body: Bytes,
        headers: Headers,
    ) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Post, url)
            .headers(headers)
            .body(body);
        self.client.execute(request).await
    }

    /// Send a fully built request
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.client.execute(request).await
    }
}
