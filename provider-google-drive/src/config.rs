//! Driver configuration section

use serde_json::Value;

use crate::error::{GoogleDriveError, Result};

/// Google Drive API base URL
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Fixed API endpoints derived from one base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Single object retrieval
    pub get: String,
    /// Initial listing call
    pub list: String,
    /// Listing continuation
    pub list_continue: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let list = format!("{}/files", base);
        Self {
            get: format!("{}/", list),
            list_continue: format!("{}/continue", list),
            list,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DRIVE_API_BASE)
    }
}

/// Parsed `gdrive` configuration section
///
/// ```json
/// { "token": "...", "app": "...", "max_pages": 500, "api_base": "https://..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleDriveConfig {
    pub token: String,
    pub app: String,
    /// Upper bound on listing pages; unbounded when `None`
    pub max_pages: Option<usize>,
    pub endpoints: Endpoints,
}

impl GoogleDriveConfig {
    /// Read and validate a configuration section
    pub fn from_json(json: &Value) -> Result<Self> {
        let token = required_string(json, "token")?;
        let app = required_string(json, "app")?;

        let max_pages = match json.get("max_pages") {
            None | Some(Value::Null) => None,
            Some(value) => {
                let pages = value.as_u64().filter(|pages| *pages > 0).ok_or_else(|| {
                    GoogleDriveError::Config(
                        "member 'max_pages' must be a positive integer".to_string(),
                    )
                })?;
                Some(usize::try_from(pages).unwrap_or(usize::MAX))
            }
        };

        let endpoints = match json.get("api_base") {
            None | Some(Value::Null) => Endpoints::default(),
            Some(Value::String(base)) if !base.is_empty() => Endpoints::new(base),
            Some(_) => {
                return Err(GoogleDriveError::Config(
                    "member 'api_base' must be a non-empty string".to_string(),
                ))
            }
        };

        Ok(Self {
            token,
            app,
            max_pages,
            endpoints,
        })
    }
}

fn required_string(json: &Value, member: &str) -> Result<String> {
    let value = json.get(member).ok_or_else(|| {
        GoogleDriveError::Config(format!("member '{}' is not present in config", member))
    })?;

    match value.as_str() {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(GoogleDriveError::Config(format!(
            "member '{}' must be a non-empty string",
            member
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();

        assert_eq!(endpoints.get, "https://www.googleapis.com/drive/v3/files/");
        assert_eq!(endpoints.list, "https://www.googleapis.com/drive/v3/files");
        assert_eq!(
            endpoints.list_continue,
            "https://www.googleapis.com/drive/v3/files/continue"
        );
    }

    #[test]
    fn test_custom_base_trailing_slash() {
        let endpoints = Endpoints::new("http://localhost:8080/api/");
        assert_eq!(endpoints.list, "http://localhost:8080/api/files");
    }

    #[test]
    fn test_minimal_section() {
        let config = GoogleDriveConfig::from_json(&json!({ "token": "t", "app": "a" })).unwrap();

        assert_eq!(config.token, "t");
        assert_eq!(config.app, "a");
        assert_eq!(config.max_pages, None);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_optional_members() {
        let config = GoogleDriveConfig::from_json(&json!({
            "token": "t",
            "app": "a",
            "max_pages": 3,
            "api_base": "http://localhost:9000"
        }))
        .unwrap();

        assert_eq!(config.max_pages, Some(3));
        assert_eq!(config.endpoints.get, "http://localhost:9000/files/");
    }

    #[test]
    fn test_missing_members_named() {
        for (section, member) in [
            (json!({ "app": "a" }), "token"),
            (json!({ "token": "t" }), "app"),
            (json!({}), "token"),
        ] {
            match GoogleDriveConfig::from_json(&section) {
                Err(GoogleDriveError::Config(msg)) => {
                    assert_eq!(msg, format!("member '{}' is not present in config", member))
                }
                other => panic!("expected config error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_empty_or_non_string() {
        assert!(GoogleDriveConfig::from_json(&json!({ "token": "", "app": "a" })).is_err());
        assert!(GoogleDriveConfig::from_json(&json!({ "token": "t", "app": 5 })).is_err());
        assert!(
            GoogleDriveConfig::from_json(&json!({ "token": "t", "app": "a", "max_pages": 0 }))
                .is_err()
        );
    }
}
