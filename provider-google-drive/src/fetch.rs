//! Single object retrieval with size verification

use bridge_traits::http::{Headers, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::path::sanitize;
use bridge_traits::pool::HttpPool;
use bytes::Bytes;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::auth::{merge_headers, AuthContext};
use crate::error::{GoogleDriveError, Result};

/// Header carrying the object size as stored on the server
pub const SIZE_HEADER: &str = "original-content-length";

/// Retrieves one object through the pool
pub struct ObjectFetcher<'a> {
    pool: &'a HttpPool,
    auth: &'a AuthContext,
    url: &'a str,
}

impl<'a> ObjectFetcher<'a> {
    pub fn new(pool: &'a HttpPool, auth: &'a AuthContext, url: &'a str) -> Self {
        Self { pool, auth, url }
    }

    /// Fetch `path`, layering `extra_headers` over the GET defaults.
    ///
    /// Returns `Ok(None)` when the server answers without declaring a size.
    #[instrument(skip(self, extra_headers), fields(path = %path))]
    pub async fn fetch(&self, path: &str, extra_headers: Headers) -> Result<Option<Bytes>> {
        let sanitized = sanitize(path.trim_start_matches('/'));
        let body = json!({ "path": format!("/{}", sanitized) }).to_string();
        let headers = merge_headers(self.auth.get_headers(), extra_headers);

        let request = HttpRequest::new(HttpMethod::Get, self.url)
            .headers(headers)
            .body(Bytes::from(body));

        let response = {
            let http = self.pool.acquire().await?;
            http.execute(request).await?
        };

        verify_download(response)
    }
}

/// Check status and declared size of a download response
fn verify_download(response: HttpResponse) -> Result<Option<Bytes>> {
    if !response.is_success() {
        warn!(status = response.status, "Object fetch failed");
        return Err(GoogleDriveError::ServerError {
            status_code: response.status,
            message: response.text_lossy(),
        });
    }

    let Some(declared) = response.header(SIZE_HEADER) else {
        debug!("Response carries no {} header", SIZE_HEADER);
        return Ok(None);
    };

    let declared: u64 = declared.trim().parse().map_err(|_| {
        GoogleDriveError::MalformedResponse(format!(
            "invalid {} header '{}'",
            SIZE_HEADER, declared
        ))
    })?;
    let actual = response.body.len() as u64;

    if declared != actual {
        warn!(declared, actual, "Downloaded size does not match declared size");
        return Err(GoogleDriveError::IntegrityMismatch { declared, actual });
    }

    debug!(bytes = actual, "Object fetched");
    Ok(Some(response.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(status: u16, size: Option<&str>, body: &'static [u8]) -> HttpResponse {
        let mut headers = HashMap::new();
        if let Some(size) = size {
            headers.insert(SIZE_HEADER.to_string(), size.to_string());
        }
        HttpResponse {
            status,
            headers,
            body: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_verify_matching_size() {
        let data = verify_download(response(200, Some("5"), b"hello")).unwrap();
        assert_eq!(data, Some(Bytes::from_static(b"hello")));
    }

    #[test]
    fn test_verify_empty_object() {
        let data = verify_download(response(200, Some("0"), b"")).unwrap();
        assert_eq!(data, Some(Bytes::new()));
    }

    #[test]
    fn test_verify_missing_size_is_soft_miss() {
        assert_eq!(verify_download(response(200, None, b"hello")).unwrap(), None);
    }

    #[test]
    fn test_verify_mismatch() {
        match verify_download(response(200, Some("10"), b"hello")) {
            Err(GoogleDriveError::IntegrityMismatch { declared, actual }) => {
                assert_eq!(declared, 10);
                assert_eq!(actual, 5);
            }
            other => panic!("expected integrity mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_bad_size_header() {
        assert!(matches!(
            verify_download(response(200, Some("many"), b"hello")),
            Err(GoogleDriveError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_verify_server_error() {
        match verify_download(response(404, None, b"path/not_found")) {
            Err(GoogleDriveError::ServerError {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 404);
                assert_eq!(message, "path/not_found");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }
}
