//! Credentials and request header derivation

use bridge_traits::http::Headers;
use core_runtime::logging::redact_if_sensitive;
use std::fmt;

pub(crate) const AUTHORIZATION: &str = "Authorization";
pub(crate) const TRANSFER_ENCODING: &str = "Transfer-Encoding";
pub(crate) const EXPECT: &str = "Expect";
pub(crate) const CONTENT_TYPE: &str = "Content-Type";

/// Pre-minted bearer token plus application key
///
/// Immutable for the lifetime of the driver; the token is never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: String,
    app: String,
}

impl AuthContext {
    pub fn new(token: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            app: app.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Headers for GET-style calls.
    ///
    /// `Transfer-Encoding` and `Expect` are present but empty so the
    /// transport does not add chunked/continue handling on its own.
    pub fn get_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(AUTHORIZATION.to_string(), self.bearer());
        headers.insert(TRANSFER_ENCODING.to_string(), String::new());
        headers.insert(EXPECT.to_string(), String::new());
        headers
    }

    /// Headers for POST-style calls carrying a JSON body
    pub fn post_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(AUTHORIZATION.to_string(), self.bearer());
        headers.insert(TRANSFER_ENCODING.to_string(), "chunked".to_string());
        headers.insert(EXPECT.to_string(), "100-continue".to_string());
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        headers
    }

    /// Headers for the initial listing call, which authenticates with the
    /// app key in the query string instead of the bearer token
    pub fn list_headers(&self) -> Headers {
        let mut headers = self.get_headers();
        headers.remove(AUTHORIZATION);
        headers
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &redact_if_sensitive("token", &self.token))
            .field("app", &redact_if_sensitive("app", &self.app))
            .finish()
    }
}

/// Layer `extra` over `defaults`.
///
/// On a name collision, compared without regard to ASCII case, the caller's
/// entry wins.
pub fn merge_headers(mut defaults: Headers, extra: Headers) -> Headers {
    for (key, value) in extra {
        defaults.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
        defaults.insert(key, value);
    }
    defaults
}
