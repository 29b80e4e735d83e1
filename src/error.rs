use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rawmail operations
#[derive(Error, Debug)]
pub enum RawmailError {
    /// Referenced file (or root document) does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File exists but could not be opened or read as text
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO error when writing output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RawmailError {
    /// Classifies a failed read of `path`: missing files become `FileNotFound`,
    /// everything else keeps the underlying IO error.
    pub fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Read { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, RawmailError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RawmailError::FileNotFound {
            path: PathBuf::from("attachments/report.pdf"),
        };
        assert_eq!(format!("{err}"), "File not found: attachments/report.pdf");

        let err = RawmailError::Read {
            path: PathBuf::from("locked.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(format!("{err}"), "Failed to read locked.txt: denied");
    }

    #[test]
    fn test_from_read_classification() {
        let err = RawmailError::from_read("gone.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, RawmailError::FileNotFound { ref path } if path == &PathBuf::from("gone.txt")));

        let err = RawmailError::from_read(
            "locked.txt",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, RawmailError::Read { .. }));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "test");
        let err: RawmailError = io_err.into();
        assert!(matches!(err, RawmailError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: RawmailError = json_err.into();
        assert!(matches!(err, RawmailError::Json(_)));
    }
}
