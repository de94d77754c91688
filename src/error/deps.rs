//! Dependency resolution errors

use super::PychubError;
use crate::resolver::FetchError;

/// Creates an unresolved path dependency error
pub fn unresolved_path(name: impl Into<String>, path: impl Into<String>) -> PychubError {
    PychubError::UnresolvedPathDependency {
        name: name.into(),
        path: path.into(),
    }
}

/// Creates an ambiguous path dependency error listing every matching wheel
pub fn ambiguous_path(
    name: impl Into<String>,
    path: impl Into<String>,
    candidates: &[impl AsRef<str>],
) -> PychubError {
    PychubError::AmbiguousPathDependency {
        name: name.into(),
        path: path.into(),
        candidates: candidates
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Creates a duplicate artifact error
pub fn duplicate(
    wheel: impl Into<String>,
    first: impl Into<String>,
    second: impl Into<String>,
) -> PychubError {
    PychubError::DuplicateArtifact {
        wheel: wheel.into(),
        first: first.into(),
        second: second.into(),
    }
}

/// Wraps a fetcher failure
pub fn remote(requirement: impl Into<String>, source: FetchError) -> PychubError {
    PychubError::RemoteResolution {
        requirement: requirement.into(),
        source,
    }
}

/// Creates an invalid wheel filename error
pub fn invalid_wheel(filename: impl Into<String>, reason: impl Into<String>) -> PychubError {
    PychubError::InvalidWheelFilename {
        filename: filename.into(),
        reason: reason.into(),
    }
}
