//! Path helpers shared by every driver
//!
//! Paths handed to the storage layer look like `gdrive://some/dir/file`.
//! The part before `://` selects the driver; the rest is driver-relative.

/// Separator between the driver type and the driver-relative path
pub const TYPE_DELIMITER: &str = "://";

/// Driver type assumed for paths without an explicit prefix
pub const DEFAULT_TYPE: &str = "file";

/// Return the driver type of `path`, `"file"` when none is given
pub fn get_type(path: &str) -> &str {
    match path.find(TYPE_DELIMITER) {
        Some(pos) => &path[..pos],
        None => DEFAULT_TYPE,
    }
}

/// Remove a leading `type://` prefix, if any
pub fn strip_type(path: &str) -> &str {
    match path.find(TYPE_DELIMITER) {
        Some(pos) => &path[pos + TYPE_DELIMITER.len()..],
        None => path,
    }
}

/// Percent-encode `path` for use on the wire.
///
/// Everything outside the unreserved set is escaped except `/`, which
/// stays as the segment separator.
pub fn sanitize(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_type() {
        assert_eq!(get_type("gdrive://dir/file.txt"), "gdrive");
        assert_eq!(get_type("/local/file.txt"), "file");
        assert_eq!(get_type(""), "file");
    }

    #[test]
    fn test_strip_type() {
        assert_eq!(strip_type("gdrive://dir/file.txt"), "dir/file.txt");
        assert_eq!(strip_type("dir/file.txt"), "dir/file.txt");
        assert_eq!(strip_type("gdrive://"), "");
    }

    #[test]
    fn test_sanitize_keeps_separators() {
        assert_eq!(sanitize("dir/sub/file.txt"), "dir/sub/file.txt");
        assert_eq!(sanitize("my dir/a+b.txt"), "my%20dir/a%2Bb.txt");
        assert_eq!(sanitize("/abs/~x_y-z"), "/abs/~x_y-z");
    }
}
