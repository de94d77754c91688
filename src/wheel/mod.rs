//! Wheel file names and resolved wheel artifacts
//!
//! A wheel file name follows
//! `{name}-{version}(-{build})?-{python}-{abi}-{platform}.whl`.
//! Names are compared in normalized form: lowercase, with runs of `-`, `_`
//! and `.` collapsed into a single `-`.

pub mod contents;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, deps};
use crate::source::Dependency;

pub use contents::WheelContents;

/// File extension of wheel archives
pub const WHEEL_EXTENSION: &str = "whl";

/// Normalize a distribution name for comparison
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.extend(c.to_lowercase());
            in_separator = false;
        }
    }

    out
}

/// Whether a version segment looks like a version (`1.2.0`, `2.0rc1`, `1!2.0+local`)
pub fn is_valid_version(version: &str) -> bool {
    let body = version.split_once('!').map_or(version, |(epoch, rest)| {
        if epoch.chars().all(|c| c.is_ascii_digit()) {
            rest
        } else {
            ""
        }
    });

    body.chars().next().is_some_and(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '_'))
}

/// Parsed wheel file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelFilename {
    /// Distribution name as written in the file name
    pub name: String,
    /// Version segment
    pub version: String,
    /// Optional build tag
    pub build: Option<String>,
    /// `{python}-{abi}-{platform}` tag triple
    pub tags: String,
}

impl WheelFilename {
    /// Parse a wheel file name such as `libfoo-1.2.0-py3-none-any.whl`
    pub fn parse(filename: &str) -> Result<Self> {
        let stem = filename
            .strip_suffix(".whl")
            .or_else(|| filename.strip_suffix(".WHL"))
            .ok_or_else(|| deps::invalid_wheel(filename, "missing .whl extension"))?;

        let parts: Vec<&str> = stem.split('-').collect();
        let (name, version, build, tags) = match parts.as_slice() {
            [name, version, py, abi, plat] => (*name, *version, None, [*py, *abi, *plat]),
            [name, version, build, py, abi, plat] => {
                (*name, *version, Some(*build), [*py, *abi, *plat])
            }
            _ => {
                return Err(deps::invalid_wheel(
                    filename,
                    "expected name-version(-build)-python-abi-platform",
                ));
            }
        };

        if name.is_empty() {
            return Err(deps::invalid_wheel(filename, "empty distribution name"));
        }
        if !is_valid_version(version) {
            return Err(deps::invalid_wheel(
                filename,
                format!("unparseable version '{}'", version),
            ));
        }
        if let Some(build) = build {
            if !build.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                return Err(deps::invalid_wheel(
                    filename,
                    format!("build tag '{}' must start with a digit", build),
                ));
            }
        }
        if tags.iter().any(|t| t.is_empty()) {
            return Err(deps::invalid_wheel(filename, "empty compatibility tag"));
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            build: build.map(str::to_string),
            tags: tags.join("-"),
        })
    }

    /// Parse the file name component of a path
    pub fn from_path(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| deps::invalid_wheel(path.display().to_string(), "not a file name"))?;
        Self::parse(filename)
    }

    /// Normalized distribution name
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Identity used for duplicate detection: normalized name and version
    pub fn identity(&self) -> (String, String) {
        (self.normalized_name(), self.version.to_lowercase())
    }

    /// Sort key: the whole file name in normalized form
    pub fn sort_key(&self) -> String {
        let mut key = format!("{}-{}", self.normalized_name(), self.version.to_lowercase());
        if let Some(build) = &self.build {
            key.push('-');
            key.push_str(build);
        }
        key.push('-');
        key.push_str(&self.tags.to_lowercase());
        key
    }
}

impl fmt::Display for WheelFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)?;
        if let Some(build) = &self.build {
            write!(f, "-{}", build)?;
        }
        write!(f, "-{}.whl", self.tags)
    }
}

/// A dependency resolved to a concrete wheel file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelArtifact {
    /// Declaration this artifact was resolved from
    pub dependency: Dependency,
    /// Location of the wheel on disk
    pub path: PathBuf,
    /// Identity parsed from the file name
    pub wheel: WheelFilename,
}

impl WheelArtifact {
    /// Create an artifact for a wheel file on disk
    pub fn new(dependency: Dependency, path: PathBuf) -> Result<Self> {
        let wheel = WheelFilename::from_path(&path)?;
        Ok(Self {
            dependency,
            path,
            wheel,
        })
    }

    /// File name of the wheel as it will appear in the archive
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.wheel.to_string())
    }
}
