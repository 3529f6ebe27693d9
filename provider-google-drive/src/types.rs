//! Listing response types
//!
//! Pages are inspected as loose JSON first so that a missing or mistyped
//! `entries` field can be reported precisely; individual entries are then
//! read with lenient defaults.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{GoogleDriveError, Result};

/// Tag marking a listing entry as a regular file
pub const FILE_TAG: &str = "file";

/// Case-insensitive tag comparison
pub fn tag_matches(tag: &str, expected: &str) -> bool {
    tag.eq_ignore_ascii_case(expected)
}

/// One entry of a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListEntry {
    /// Entry kind (`file`, `folder`, ...)
    #[serde(rename = ".tag", default)]
    pub tag: String,

    /// Absolute path, leading slash included
    #[serde(rename = "path_lower", default)]
    pub path: String,
}

impl ListEntry {
    pub fn is_file(&self) -> bool {
        tag_matches(&self.tag, FILE_TAG)
    }
}

/// One parsed page of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub entries: Vec<ListEntry>,
    pub has_more: bool,
    pub cursor: String,
}

impl ListingPage {
    /// Parse a page body.
    ///
    /// An empty body carries no page and yields `Ok(None)`.
    pub fn parse(body: &[u8]) -> Result<Option<Self>> {
        if body.is_empty() {
            return Ok(None);
        }

        let json: Value = serde_json::from_slice(body).map_err(|e| {
            GoogleDriveError::MalformedResponse(format!("listing body is not JSON: {}", e))
        })?;

        let entries = match json.get("entries") {
            None | Some(Value::Null) => {
                return Err(GoogleDriveError::MalformedResponse(
                    "listing entries missing".to_string(),
                ))
            }
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(GoogleDriveError::MalformedResponse(
                    "listing entries not a collection".to_string(),
                ))
            }
        };

        let entries = entries
            .iter()
            .map(|entry| ListEntry::deserialize(entry).unwrap_or_default())
            .collect();

        Ok(Some(Self {
            entries,
            has_more: json.get("has_more").and_then(Value::as_bool).unwrap_or(false),
            cursor: json
                .get("nextPageToken")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }))
    }

    /// Paths of file entries, in page order
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| entry.is_file())
            .map(|entry| entry.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_matches_any_case() {
        assert!(tag_matches("file", FILE_TAG));
        assert!(tag_matches("File", FILE_TAG));
        assert!(tag_matches("FILE", FILE_TAG));
        assert!(!tag_matches("folder", FILE_TAG));
        assert!(!tag_matches("files", FILE_TAG));
    }

    #[test]
    fn test_parse_page() {
        let body = br#"{
            "entries": [
                { ".tag": "file", "path_lower": "/dir/a.txt" },
                { ".tag": "folder", "path_lower": "/dir/sub" },
                { ".tag": "FILE", "path_lower": "/dir/b.txt" }
            ],
            "has_more": true,
            "nextPageToken": "cursor-1"
        }"#;

        let page = ListingPage::parse(body).unwrap().unwrap();

        assert_eq!(page.entries.len(), 3);
        assert!(page.has_more);
        assert_eq!(page.cursor, "cursor-1");
        assert_eq!(page.file_paths().collect::<Vec<_>>(), vec!["/dir/a.txt", "/dir/b.txt"]);
    }

    #[test]
    fn test_parse_defaults() {
        let page = ListingPage::parse(br#"{ "entries": [ { "path_lower": "/x" }, 7 ] }"#)
            .unwrap()
            .unwrap();

        assert!(!page.has_more);
        assert_eq!(page.cursor, "");
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.file_paths().count(), 0);
    }

    #[test]
    fn test_empty_body_is_no_page() {
        assert_eq!(ListingPage::parse(b"").unwrap(), None);
    }

    #[test]
    fn test_entries_null_or_missing() {
        let bodies: [&[u8]; 2] = [br#"{ "entries": null }"#, br#"{ "has_more": false }"#];
        for body in bodies {
            match ListingPage::parse(body) {
                Err(GoogleDriveError::MalformedResponse(msg)) => assert!(msg.contains("missing")),
                other => panic!("expected malformed response, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_json_keeps_parser_message() {
        match ListingPage::parse(b"not json") {
            Err(GoogleDriveError::MalformedResponse(msg)) => {
                assert!(msg.starts_with("listing body is not JSON: "));
                assert!(msg.contains("line 1"));
            }
            other => panic!("expected malformed response, got {:?}", other),
        }
    }

    #[test]
    fn test_entries_not_array() {
        match ListingPage::parse(br#"{ "entries": { "a": 1 } }"#) {
            Err(GoogleDriveError::MalformedResponse(msg)) => {
                assert!(msg.contains("not a collection"))
            }
            other => panic!("expected malformed response, got {:?}", other),
        }
    }
}
