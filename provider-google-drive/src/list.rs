//! Paginated directory listing

use bridge_traits::path::sanitize;
use bridge_traits::pool::HttpPool;
use bytes::Bytes;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::auth::AuthContext;
use crate::config::Endpoints;
use crate::error::{GoogleDriveError, Result};
use crate::types::ListingPage;

/// Status the listing endpoint uses for "nothing here"
const NO_RESULTS_STATUS: u16 = 409;

/// Drop a trailing `*`/`**` wildcard and the separator before it
pub fn strip_wildcard(path: &str) -> &str {
    path.trim_end_matches('*').trim_end_matches('/')
}

/// Accumulated state of one listing
#[derive(Debug, Default)]
struct Pagination {
    results: Vec<String>,
    has_more: bool,
    cursor: String,
    pages: usize,
}

impl Pagination {
    /// Fold one page into the state.
    ///
    /// A missing page ends the listing; only the initial call may produce one.
    fn absorb(mut self, page: Option<ListingPage>, scheme: &str, verbose: bool) -> Self {
        self.pages += 1;

        let Some(page) = page else {
            self.has_more = false;
            return self;
        };

        let before = self.results.len();
        self.results
            .extend(page.file_paths().map(|path| format!("{}:/{}", scheme, path)));

        if verbose {
            info!(
                page = self.pages,
                entries = page.entries.len(),
                files = self.results.len() - before,
                has_more = page.has_more,
                "Listed page"
            );
        } else {
            debug!(
                page = self.pages,
                entries = page.entries.len(),
                files = self.results.len() - before,
                has_more = page.has_more,
                "Listed page"
            );
        }

        self.has_more = page.has_more;
        self.cursor = page.cursor;
        self
    }
}

/// Walks the cursor-based listing protocol
pub struct DirectoryLister<'a> {
    pool: &'a HttpPool,
    auth: &'a AuthContext,
    endpoints: &'a Endpoints,
    scheme: &'a str,
    max_pages: Option<usize>,
}

impl<'a> DirectoryLister<'a> {
    pub fn new(
        pool: &'a HttpPool,
        auth: &'a AuthContext,
        endpoints: &'a Endpoints,
        scheme: &'a str,
    ) -> Self {
        Self {
            pool,
            auth,
            endpoints,
            scheme,
            max_pages: None,
        }
    }

    /// Stop with an error once this many pages have been requested
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// List files under `path`, returning scheme-prefixed paths in server order
    #[instrument(skip(self), fields(path = %path))]
    pub async fn list(&self, path: &str, verbose: bool) -> Result<Vec<String>> {
        let prefix = sanitize(strip_wildcard(path).trim_start_matches('/'));
        debug!(prefix = %prefix, "Listing prefix");

        let first = self.list_first(&prefix).await?;
        let mut state =
            Pagination::default().absorb(ListingPage::parse(&first)?, self.scheme, verbose);

        while state.has_more {
            if let Some(limit) = self.max_pages {
                if state.pages >= limit {
                    warn!(limit, "Listing still reports more pages");
                    return Err(GoogleDriveError::PaginationLimitExceeded { limit });
                }
            }

            let body = self.list_continue(&state.cursor).await?;
            let page = ListingPage::parse(&body)?.ok_or_else(|| {
                GoogleDriveError::MalformedResponse(
                    "listing continuation returned no page".to_string(),
                )
            })?;
            state = state.absorb(Some(page), self.scheme, verbose);
        }

        info!(files = state.results.len(), pages = state.pages, "Listing complete");
        Ok(state.results)
    }

    /// Initial listing request; a 409 yields an empty body
    async fn list_first(&self, prefix: &str) -> Result<Bytes> {
        let url = format!(
            "{}?key={}&path=/{}",
            self.endpoints.list,
            urlencoding::encode(self.auth.app()),
            prefix
        );

        let response = {
            let http = self.pool.acquire().await?;
            http.get(url, self.auth.list_headers()).await?
        };

        if response.is_success() {
            Ok(response.body)
        } else if response.status == NO_RESULTS_STATUS {
            debug!("Listing reported no results");
            Ok(Bytes::new())
        } else {
            warn!(status = response.status, "Listing request failed");
            Err(GoogleDriveError::ServerError {
                status_code: response.status,
                message: response.text_lossy(),
            })
        }
    }

    /// Follow-up request for the page after `cursor`
    async fn list_continue(&self, cursor: &str) -> Result<Bytes> {
        let body = json!({ "nextPageToken": cursor }).to_string();

        let response = {
            let http = self.pool.acquire().await?;
            http.post(
                self.endpoints.list_continue.as_str(),
                Bytes::from(body),
                self.auth.post_headers(),
            )
            .await?
        };

        if response.is_success() {
            Ok(response.body)
        } else {
            warn!(status = response.status, "Listing continuation failed");
            Err(GoogleDriveError::ServerError {
                status_code: response.status,
                message: response.text_lossy(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ListEntry;

    fn entry(tag: &str, path: &str) -> ListEntry {
        ListEntry {
            tag: tag.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_strip_wildcard() {
        assert_eq!(strip_wildcard("dir/*"), "dir");
        assert_eq!(strip_wildcard("dir/sub/**"), "dir/sub");
        assert_eq!(strip_wildcard("*"), "");
        assert_eq!(strip_wildcard("dir"), "dir");
    }

    #[test]
    fn test_absorb_accumulates_in_order() {
        let first = ListingPage {
            entries: vec![entry("file", "/a"), entry("folder", "/d")],
            has_more: true,
            cursor: "c1".to_string(),
        };
        let second = ListingPage {
            entries: vec![entry("File", "/b")],
            has_more: false,
            cursor: String::new(),
        };

        let state = Pagination::default().absorb(Some(first), "gdrive", false);
        assert!(state.has_more);
        assert_eq!(state.cursor, "c1");

        let state = state.absorb(Some(second), "gdrive", true);
        assert!(!state.has_more);
        assert_eq!(state.pages, 2);
        assert_eq!(state.results, vec!["gdrive://a", "gdrive://b"]);
    }

    #[test]
    fn test_absorb_missing_page_stops() {
        let state = Pagination {
            has_more: true,
            ..Pagination::default()
        }
        .absorb(None, "gdrive", false);

        assert!(!state.has_more);
        assert!(state.results.is_empty());
    }
}
