//! Table locations and project file kinds
//!
//! A project file keeps pychub settings in one table. `pyproject.toml` is
//! shared with other tools, so it is locked to `[tool.pychub.package]`.
//! Dedicated `chubproject*.toml` files may use any of the dotted tables or
//! put the fields at the document root (`flat`).

use std::fmt;
use std::path::Path;

use crate::error::{Result, config};

/// File name that is always treated as a pyproject file
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Marker that a dedicated project file name must contain
const CHUBPROJECT_MARKER: &str = "chubproject";

/// Where in a TOML document the pychub fields live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableLocation {
    /// Document root
    Flat,
    /// `[tool.pychub.package]`
    #[default]
    ToolPychubPackage,
    /// `[pychub.package]`
    PychubPackage,
    /// `[package]`
    Package,
}

impl TableLocation {
    /// Every location, dotted tables in lookup order followed by `Flat`
    pub const ALL: [TableLocation; 4] = [
        TableLocation::ToolPychubPackage,
        TableLocation::PychubPackage,
        TableLocation::Package,
        TableLocation::Flat,
    ];

    /// Parse a table name; surrounding whitespace and case are ignored
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Canonical name, as accepted by `--table`
    pub fn as_str(&self) -> &'static str {
        match self {
            TableLocation::Flat => "flat",
            TableLocation::ToolPychubPackage => "tool.pychub.package",
            TableLocation::PychubPackage => "pychub.package",
            TableLocation::Package => "package",
        }
    }

    /// Key path from the document root to the table
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            TableLocation::Flat => &[],
            TableLocation::ToolPychubPackage => &["tool", "pychub", "package"],
            TableLocation::PychubPackage => &["pychub", "package"],
            TableLocation::Package => &["package"],
        }
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of project file, decided by its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pyproject,
    Chubproject,
}

impl FileKind {
    /// Classify a bare file name
    pub fn from_name(name: &str) -> Option<Self> {
        if name == PYPROJECT_FILE {
            return Some(FileKind::Pyproject);
        }
        is_chubproject_name(name).then_some(FileKind::Chubproject)
    }

    /// Classify a path by its file name
    pub fn from_path(path: &Path) -> Result<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_name)
            .ok_or_else(|| config::invalid_filename(path.display().to_string()))
    }

    /// Check a requested table name against what this file kind accepts
    ///
    /// Returns `None` when no table was requested.
    pub fn check_table(self, requested: Option<&str>, path: &Path) -> Result<Option<TableLocation>> {
        let Some(requested) = requested else {
            return Ok(None);
        };

        let location = TableLocation::parse(requested).ok_or_else(|| {
            config::invalid_table(
                requested,
                path.display().to_string(),
                "not a recognized table name",
            )
        })?;

        if self == FileKind::Pyproject && location != TableLocation::ToolPychubPackage {
            return Err(config::invalid_table(
                requested,
                path.display().to_string(),
                "pyproject.toml only supports tool.pychub.package",
            ));
        }

        Ok(Some(location))
    }
}

/// `(.*[-_.])?chubproject([-_.].*)?\.toml`, case-insensitive
fn is_chubproject_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let Some(stem) = lower.strip_suffix(".toml") else {
        return false;
    };
    let is_sep = |c: char| matches!(c, '-' | '_' | '.');

    stem.match_indices(CHUBPROJECT_MARKER).any(|(i, _)| {
        let before = &stem[..i];
        let after = &stem[i + CHUBPROJECT_MARKER.len()..];
        (before.is_empty() || before.ends_with(is_sep))
            && (after.is_empty() || after.starts_with(is_sep))
    })
}
