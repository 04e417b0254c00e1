//! Error types for Deskscan.
//!
//! The resolver itself never fails a scan; these errors describe the
//! individual steps that can go wrong and end up as diagnostics or logs.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Deskscan library.
#[derive(Debug, Error)]
pub enum DeskscanError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    // Shell automation errors
    #[error("Shell automation failed during {operation}: HRESULT 0x{hresult:08X}")]
    ShellAutomation { operation: String, hresult: u32 },

    #[error("Shortcut {path:?} has an unreadable target path")]
    UnreadableTarget { path: PathBuf },

    // Menu errors
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    // External command errors
    #[error("Command `{program}` failed: {message}")]
    CommandFailed { program: String, message: String },

    #[error("{feature} is not supported on {platform}")]
    Unsupported {
        feature: String,
        platform: &'static str,
    },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Deskscan operations.
pub type Result<T> = std::result::Result<T, DeskscanError>;

impl From<std::io::Error> for DeskscanError {
    fn from(err: std::io::Error) -> Self {
        DeskscanError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl DeskscanError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        DeskscanError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a shell automation error from a failed HRESULT.
    pub fn shell(operation: impl Into<String>, hresult: i32) -> Self {
        DeskscanError::ShellAutomation {
            operation: operation.into(),
            hresult: hresult as u32,
        }
    }

    /// Create an error for a feature that has no back end on this platform.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        DeskscanError::Unsupported {
            feature: feature.into(),
            platform: crate::platform::current_platform(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_error_formats_hresult_as_hex() {
        // E_FAIL
        let err = DeskscanError::shell("CoCreateInstance", 0x8000_4005_u32 as i32);
        assert_eq!(
            err.to_string(),
            "Shell automation failed during CoCreateInstance: HRESULT 0x80004005"
        );
    }

    #[test]
    fn test_io_with_path_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DeskscanError::io_with_path(io, "C:\\Locked");
        match err {
            DeskscanError::Io { path, source, .. } => {
                assert_eq!(path, Some(PathBuf::from("C:\\Locked")));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_names_platform() {
        let err = DeskscanError::unsupported("Shell automation");
        assert!(err.to_string().starts_with("Shell automation is not supported on "));
    }
}
