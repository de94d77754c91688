//! Configuration discovery and format errors

use super::PychubError;

/// Creates an invalid project file name error
pub fn invalid_filename(path: impl Into<String>) -> PychubError {
    PychubError::InvalidFilename { path: path.into() }
}

/// Creates an ambiguous configuration error from the candidate file names
pub fn ambiguous(root: impl Into<String>, candidates: &[impl AsRef<str>]) -> PychubError {
    PychubError::AmbiguousConfig {
        root: root.into(),
        candidates: candidates
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> PychubError {
    PychubError::ConfigNotFound { path: path.into() }
}

/// Creates an invalid table error
pub fn invalid_table(
    table: impl Into<String>,
    path: impl Into<String>,
    reason: impl Into<String>,
) -> PychubError {
    PychubError::InvalidTable {
        table: table.into(),
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PychubError {
    PychubError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> PychubError {
    PychubError::ConfigInvalid {
        message: message.into(),
    }
}
