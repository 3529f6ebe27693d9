//! Error types for Google Drive provider

use thiserror::Error;

/// Google Drive provider errors
#[derive(Error, Debug)]
pub enum GoogleDriveError {
    /// Driver configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The driver does not implement this operation
    #[error("{operation} not yet supported for {driver}")]
    UnsupportedOperation {
        operation: &'static str,
        driver: &'static str,
    },

    /// API request returned a non-success status
    #[error("Server response: {status_code} - '{message}'")]
    ServerError { status_code: u16, message: String },

    /// Downloaded byte count differs from the size declared by the server
    #[error("Data size check failed. Stated size was '{declared}' and downloaded size was '{actual}'")]
    IntegrityMismatch { declared: u64, actual: u64 },

    /// Response body does not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Direct read could not retrieve the object
    #[error("Couldn't GDrive GET {path}")]
    NotFound { path: String },

    /// Listing kept reporting more pages past the configured cap
    #[error("Listing exceeded the limit of {limit} pages")]
    PaginationLimitExceeded { limit: usize },

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] bridge_traits::error::BridgeError),
}

/// Result type for Google Drive operations
pub type Result<T> = std::result::Result<T, GoogleDriveError>;

/// Collapses into the generic bridge taxonomy.
///
/// A 404 from the server becomes `NotFound`; other server, integrity and
/// parsing failures keep their message inside `OperationFailed`. Callers
/// that need the status code or the declared/actual sizes should use the
/// driver's inherent methods, which return `GoogleDriveError` directly.
impl From<GoogleDriveError> for bridge_traits::error::BridgeError {
    fn from(error: GoogleDriveError) -> Self {
        match error {
            GoogleDriveError::NotFound { .. }
            | GoogleDriveError::ServerError {
                status_code: 404, ..
            } => bridge_traits::error::BridgeError::NotFound(error.to_string()),
            GoogleDriveError::UnsupportedOperation { .. } => {
                bridge_traits::error::BridgeError::Unsupported(error.to_string())
            }
            GoogleDriveError::BridgeError(e) => e,
            other => bridge_traits::error::BridgeError::OperationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GoogleDriveError::ServerError {
            status_code: 404,
            message: "File not found".to_string(),
        };

        assert_eq!(error.to_string(), "Server response: 404 - 'File not found'");

        let error = GoogleDriveError::IntegrityMismatch {
            declared: 10,
            actual: 7,
        };
        assert!(error.to_string().contains("'10'"));
        assert!(error.to_string().contains("'7'"));
    }

    #[test]
    fn test_error_conversion() {
        let bridge_error: bridge_traits::error::BridgeError = GoogleDriveError::NotFound {
            path: "gdrive://a".to_string(),
        }
        .into();
        assert!(matches!(
            bridge_error,
            bridge_traits::error::BridgeError::NotFound(ref msg) if msg.contains("gdrive://a")
        ));

        let bridge_error: bridge_traits::error::BridgeError =
            GoogleDriveError::UnsupportedOperation {
                operation: "PUT",
                driver: "gdrive",
            }
            .into();
        assert!(matches!(
            bridge_error,
            bridge_traits::error::BridgeError::Unsupported(_)
        ));

        let bridge_error: bridge_traits::error::BridgeError =
            GoogleDriveError::MalformedResponse("entries missing".to_string()).into();
        assert!(matches!(
            bridge_error,
            bridge_traits::error::BridgeError::OperationFailed(_)
        ));
    }

    #[test]
    fn test_server_status_mapping() {
        let bridge_error: bridge_traits::error::BridgeError = GoogleDriveError::ServerError {
            status_code: 404,
            message: "nf".to_string(),
        }
        .into();
        match bridge_error {
            bridge_traits::error::BridgeError::NotFound(msg) => {
                assert_eq!(msg, "Server response: 404 - 'nf'")
            }
            other => panic!("expected not found, got {:?}", other),
        }

        let bridge_error: bridge_traits::error::BridgeError = GoogleDriveError::ServerError {
            status_code: 500,
            message: "backend".to_string(),
        }
        .into();
        assert!(matches!(
            bridge_error,
            bridge_traits::error::BridgeError::OperationFailed(ref msg) if msg.contains("500")
        ));

        let bridge_error: bridge_traits::error::BridgeError =
            GoogleDriveError::IntegrityMismatch {
                declared: 8,
                actual: 5,
            }
            .into();
        assert!(matches!(
            bridge_error,
            bridge_traits::error::BridgeError::OperationFailed(_)
        ));
    }
}
