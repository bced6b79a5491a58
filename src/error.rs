//! Error types for dustat
//!
//! The scanner's failure policy is best-effort: a node that cannot be
//! listed is excluded from the totals and the run continues. `ScanError`
//! classifies the underlying I/O failure so callers can tell the kinds
//! the policy anticipates (permission denied, node vanished mid-walk)
//! from everything else.
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Keep the path that failed in every variant for diagnostics

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A filesystem failure encountered while scanning a single node
#[derive(Error, Debug)]
pub enum ScanError {
    /// The process lacks permission to list or stat this node
    #[error("permission denied: '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The node existed at discovery time but was gone when visited
    #[error("path not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Directory listing failed for a reason outside the expected set
    #[error("failed to read directory '{path}': {source}")]
    ReadDir { path: PathBuf, source: io::Error },

    /// Reading an entry's metadata failed for a reason outside the expected set
    #[error("failed to stat '{path}': {source}")]
    Metadata { path: PathBuf, source: io::Error },
}

impl ScanError {
    /// Classify a `read_dir` failure on `path`
    pub fn listing(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied {
                path: path.to_owned(),
            },
            io::ErrorKind::NotFound => ScanError::NotFound {
                path: path.to_owned(),
            },
            _ => ScanError::ReadDir {
                path: path.to_owned(),
                source,
            },
        }
    }

    /// Classify a `file_type`/`metadata` failure on `path`
    pub fn metadata(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            io::ErrorKind::NotFound => ScanError::NotFound { path },
            _ => ScanError::Metadata { path, source },
        }
    }

    /// Check if this is a failure kind the best-effort policy anticipates
    ///
    /// Expected kinds log at debug level and stay invisible under the
    /// default filter; anything else surfaces at warn.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            ScanError::PermissionDenied { .. } | ScanError::NotFound { .. }
        )
    }

    /// The path of the node that failed
    pub fn path(&self) -> &Path {
        match self {
            ScanError::PermissionDenied { path }
            | ScanError::NotFound { path }
            | ScanError::ReadDir { path, .. }
            | ScanError::Metadata { path, .. } => path,
        }
    }

    /// Consume the error, keeping only the failing path
    pub fn into_path(self) -> PathBuf {
        match self {
            ScanError::PermissionDenied { path }
            | ScanError::NotFound { path }
            | ScanError::ReadDir { path, .. }
            | ScanError::Metadata { path, .. } => path,
        }
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_classification() {
        let denied = ScanError::listing(
            Path::new("/locked"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(denied, ScanError::PermissionDenied { .. }));
        assert!(denied.is_expected());

        let missing = ScanError::listing(
            Path::new("/gone"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(missing, ScanError::NotFound { .. }));
        assert!(missing.is_expected());

        let other = ScanError::listing(
            Path::new("/odd"),
            io::Error::new(io::ErrorKind::Other, "io"),
        );
        assert!(matches!(other, ScanError::ReadDir { .. }));
        assert!(!other.is_expected());
    }

    #[test]
    fn test_error_path() {
        let err = ScanError::metadata(
            PathBuf::from("/data/file"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.path(), Path::new("/data/file"));
        assert_eq!(err.into_path(), PathBuf::from("/data/file"));
    }
}
