use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for aver operations
#[derive(Error, Debug)]
pub enum AverError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Root directory not found: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("Cannot access '{}': {}", path.display(), source)]
    NotAccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a binary module: {}", .0.display())]
    NotABinary(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in aver
pub type Result<T> = std::result::Result<T, AverError>;

impl AverError {
    /// Create a format error with context
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        AverError::InvalidFormat(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AverError::Config(msg.into())
    }

    /// Wrap an I/O failure on a specific path
    pub fn not_accessible(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AverError::NotAccessible {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AverError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AverError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_missing_root_mentions_path() {
        let err = AverError::MissingRoot(PathBuf::from("/no/such/dir"));
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_not_accessible_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AverError::not_accessible("/locked", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/locked"));
        assert!(msg.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (AverError::config("x"), "Configuration error"),
            (AverError::invalid_format("x"), "Invalid format"),
            (AverError::NotABinary(PathBuf::from("x")), "Not a binary module"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
