//! Archive assembly errors

use super::PychubError;

/// Creates a wheel collision error
pub fn wheel_collision(filename: impl Into<String>) -> PychubError {
    PychubError::WheelCollision {
        filename: filename.into(),
    }
}

/// Creates an invalid entrypoint error
pub fn invalid_entrypoint(
    entrypoint: impl Into<String>,
    wheel: impl Into<String>,
    reason: impl Into<String>,
) -> PychubError {
    PychubError::InvalidEntrypoint {
        entrypoint: entrypoint.into(),
        wheel: wheel.into(),
        reason: reason.into(),
    }
}

/// Creates a missing script error; `kind` is `pre` or `post`
pub fn missing_script(kind: impl Into<String>, path: impl Into<String>) -> PychubError {
    PychubError::MissingScript {
        kind: kind.into(),
        path: path.into(),
    }
}

/// Creates a script collision error
pub fn script_collision(dest: impl Into<String>) -> PychubError {
    PychubError::ScriptCollision { dest: dest.into() }
}

/// Creates a missing include error
pub fn missing_include(path: impl Into<String>) -> PychubError {
    PychubError::MissingInclude { path: path.into() }
}

/// Creates an include collision error
pub fn include_collision(dest: impl Into<String>) -> PychubError {
    PychubError::IncludeCollision { dest: dest.into() }
}
