//! Error types shared by the review core and the terminal front end

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MswpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Could not read folder {}: {reason}", path.display())]
    ScanFailed { path: PathBuf, reason: String },

    #[error("Could not move {} to quarantine: {reason}", path.display())]
    MoveFailed { path: PathBuf, reason: String },

    #[error("Could not restore {}: {reason}", path.display())]
    RestoreFailed { path: PathBuf, reason: String },

    #[error("Could not purge {}: {reason}", path.display())]
    PurgeFailed { path: PathBuf, reason: String },

    /// A file with the same basename is already quarantined
    #[error("'{name}' already exists in {}", dir.display())]
    Collision { name: String, dir: PathBuf },

    /// An operation was invoked while its precondition did not hold
    #[error("Cannot {operation}: {reason}")]
    OutOfRange {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("Preview failed for {name}: {reason}")]
    Preview { name: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MswpError {
    /// True for failures caused by the filesystem rather than by the caller
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            MswpError::Io(_)
                | MswpError::ScanFailed { .. }
                | MswpError::MoveFailed { .. }
                | MswpError::RestoreFailed { .. }
                | MswpError::PurgeFailed { .. }
        )
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, MswpError::OutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, MswpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_class() {
        let err = MswpError::MoveFailed {
            path: PathBuf::from("/tmp/a.jpg"),
            reason: "permission denied".to_string(),
        };
        assert!(err.is_io());
        assert!(!err.is_out_of_range());

        let err = MswpError::Collision {
            name: "a.jpg".to_string(),
            dir: PathBuf::from("/tmp/_deleted"),
        };
        assert!(!err.is_io());
    }

    #[test]
    fn test_messages_keep_reason() {
        let err = MswpError::RestoreFailed {
            path: PathBuf::from("/photos/a.jpg"),
            reason: "original location is occupied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/photos/a.jpg"));
        assert!(msg.contains("original location is occupied"));

        let err = MswpError::OutOfRange {
            operation: "keep",
            reason: "no item left to review",
        };
        assert_eq!(err.to_string(), "Cannot keep: no item left to review");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: MswpError = io_err.into();
        assert!(err.is_io());
    }
}
