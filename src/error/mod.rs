//! Error types and handling for pychub
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration discovery and format errors
//! - [`deps`]: Dependency resolution errors
//! - [`archive`]: Archive assembly errors
//! - [`fs`]: File system errors

pub mod archive;
pub mod config;
pub mod deps;
pub mod fs;

use miette::Diagnostic;
use thiserror::Error;

use crate::resolver::FetchError;

/// Coarse grouping of [`PychubError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ConfigDiscovery,
    ConfigFormat,
    DependencyResolution,
    ArchiveAssembly,
    Io,
}

/// Main error type for pychub operations
#[derive(Error, Diagnostic, Debug)]
pub enum PychubError {
    // Configuration discovery errors
    #[error("Invalid project file name: {path}")]
    #[diagnostic(
        code(pychub::config::invalid_filename),
        help("Use pyproject.toml or a name containing 'chubproject' ending in .toml (e.g. chubproject.toml, my-chubproject.toml)")
    )]
    InvalidFilename { path: String },

    #[error("Multiple project files found in {root}: {candidates}")]
    #[diagnostic(
        code(pychub::config::ambiguous),
        help("Pass --chubproject <path> to choose one")
    )]
    AmbiguousConfig { root: String, candidates: String },

    #[error("Project file not found: {path}")]
    #[diagnostic(code(pychub::config::not_found))]
    ConfigNotFound { path: String },

    // Configuration format errors
    #[error("Invalid table '{table}' for {path}: {reason}")]
    #[diagnostic(
        code(pychub::config::invalid_table),
        help("Valid tables: flat, tool.pychub.package, pychub.package, package (pyproject.toml only accepts tool.pychub.package)")
    )]
    InvalidTable {
        table: String,
        path: String,
        reason: String,
    },

    #[error("Failed to parse project file {path}: {reason}")]
    #[diagnostic(code(pychub::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(pychub::config::invalid))]
    ConfigInvalid { message: String },

    // Dependency resolution errors
    #[error("No wheel for '{name}' found under {path}")]
    #[diagnostic(
        code(pychub::deps::unresolved_path),
        help("Build the dependency first so a wheel lands in its dist/ directory")
    )]
    UnresolvedPathDependency { name: String, path: String },

    #[error("Multiple wheels for '{name}' found under {path}: {candidates}")]
    #[diagnostic(
        code(pychub::deps::ambiguous_path),
        help("Pin a version for this dependency or remove stale wheels from dist/")
    )]
    AmbiguousPathDependency {
        name: String,
        path: String,
        candidates: String,
    },

    #[error("Wheel '{wheel}' is provided by both '{first}' and '{second}'")]
    #[diagnostic(code(pychub::deps::duplicate))]
    DuplicateArtifact {
        wheel: String,
        first: String,
        second: String,
    },

    #[error("Failed to fetch '{requirement}' from the package index")]
    #[diagnostic(code(pychub::deps::remote))]
    RemoteResolution {
        requirement: String,
        #[source]
        source: FetchError,
    },

    #[error("Invalid wheel filename '{filename}': {reason}")]
    #[diagnostic(code(pychub::deps::invalid_wheel))]
    InvalidWheelFilename { filename: String, reason: String },

    // Archive assembly errors
    #[error("Wheel file name collision: {filename}")]
    #[diagnostic(
        code(pychub::archive::wheel_collision),
        help("The same wheel was supplied twice, e.g. via both --add-wheel and the project file")
    )]
    WheelCollision { filename: String },

    #[error("Invalid entrypoint '{entrypoint}' for {wheel}: {reason}")]
    #[diagnostic(
        code(pychub::archive::invalid_entrypoint),
        help("Use 'module:function' or the name of a console script declared by the wheel")
    )]
    InvalidEntrypoint {
        entrypoint: String,
        wheel: String,
        reason: String,
    },

    #[error("{kind}-install script not found: {path}")]
    #[diagnostic(code(pychub::archive::missing_script))]
    MissingScript { kind: String, path: String },

    #[error("Install scripts share an archive path: {dest}")]
    #[diagnostic(
        code(pychub::archive::script_collision),
        help("Rename one of the scripts; scripts of one kind are stored by file name")
    )]
    ScriptCollision { dest: String },

    #[error("Included file not found: {path}")]
    #[diagnostic(code(pychub::archive::missing_include))]
    MissingInclude { path: String },

    #[error("Multiple includes map to the same destination: {dest}")]
    #[diagnostic(code(pychub::archive::include_collision))]
    IncludeCollision { dest: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(pychub::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(pychub::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pychub::fs::io_error))]
    IoError { message: String },
}

impl PychubError {
    /// Which stage of the pipeline produced this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFilename { .. }
            | Self::AmbiguousConfig { .. }
            | Self::ConfigNotFound { .. } => ErrorCategory::ConfigDiscovery,
            Self::InvalidTable { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. } => ErrorCategory::ConfigFormat,
            Self::UnresolvedPathDependency { .. }
            | Self::AmbiguousPathDependency { .. }
            | Self::DuplicateArtifact { .. }
            | Self::RemoteResolution { .. }
            | Self::InvalidWheelFilename { .. } => ErrorCategory::DependencyResolution,
            Self::WheelCollision { .. }
            | Self::InvalidEntrypoint { .. }
            | Self::MissingScript { .. }
            | Self::ScriptCollision { .. }
            | Self::MissingInclude { .. }
            | Self::IncludeCollision { .. } => ErrorCategory::ArchiveAssembly,
            Self::FileReadFailed { .. } | Self::FileWriteFailed { .. } | Self::IoError { .. } => {
                ErrorCategory::Io
            }
        }
    }
}

impl From<std::io::Error> for PychubError {
    fn from(err: std::io::Error) -> Self {
        PychubError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PychubError {
    fn from(err: toml::ser::Error) -> Self {
        PychubError::ConfigInvalid {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PychubError {
    fn from(err: serde_yaml::Error) -> Self {
        PychubError::IoError {
            message: format!("Failed to serialize manifest: {}", err),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PychubError>;
