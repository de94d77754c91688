//! The Dependency enum and its string and TOML forms

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, config};
use crate::path_utils::to_forward_slashes;

/// A declared extra wheel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// Package fetched from the index
    Remote {
        /// Distribution name as declared
        name: String,
        /// Version constraint (`>=2.0`, `==1.2.0`, `[extra]>=1`), if any
        constraint: Option<String>,
    },
    /// Wheel built locally: a project directory or a `.whl` file
    Path {
        /// Project directory or wheel file (relative or absolute)
        path: PathBuf,
        /// Exact version pin used to pick among several built wheels
        version: Option<String>,
    },
}

impl Dependency {
    /// Parse a dependency from its string form
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(config::invalid("empty dependency"));
        }

        if is_path_like(input) {
            return Ok(Dependency::Path {
                path: PathBuf::from(input),
                version: None,
            });
        }

        let split = input
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
            .unwrap_or(input.len());
        let (name, rest) = input.split_at(split);

        if name.is_empty() {
            return Err(config::invalid(format!(
                "dependency '{}' does not start with a package name",
                input
            )));
        }

        let rest = rest.trim();
        Ok(Dependency::Remote {
            name: name.to_string(),
            constraint: (!rest.is_empty()).then(|| rest.to_string()),
        })
    }

    /// Read a dependency from a TOML string or inline table
    pub fn from_toml(value: &toml::Value) -> Result<Self> {
        match value {
            toml::Value::String(s) => Self::parse(s),
            toml::Value::Table(table) => {
                let version = match table.get("version") {
                    None => None,
                    Some(toml::Value::String(v)) if v.trim().is_empty() => None,
                    Some(toml::Value::String(v)) => Some(v.trim().to_string()),
                    Some(other) => {
                        return Err(config::invalid(format!(
                            "dependency version must be a string, got {}",
                            other.type_str()
                        )));
                    }
                };

                match (table.get("path"), table.get("name")) {
                    (Some(toml::Value::String(path)), None) => Ok(Dependency::Path {
                        path: PathBuf::from(path),
                        version: version.map(|v| v.trim_start_matches("==").to_string()),
                    }),
                    (None, Some(toml::Value::String(name))) => {
                        let constraint = version.map(|v| {
                            if v.starts_with(|c: char| c.is_ascii_digit()) {
                                format!("=={}", v)
                            } else {
                                v
                            }
                        });
                        match Self::parse(name)? {
                            Dependency::Remote {
                                name,
                                constraint: None,
                            } => Ok(Dependency::Remote { name, constraint }),
                            _ => Err(config::invalid(format!(
                                "dependency name '{}' must be a bare package name",
                                name
                            ))),
                        }
                    }
                    (Some(_), Some(_)) => Err(config::invalid(
                        "dependency table must have either 'path' or 'name', not both",
                    )),
                    _ => Err(config::invalid(
                        "dependency table needs a string 'path' or 'name'",
                    )),
                }
            }
            other => Err(config::invalid(format!(
                "dependency must be a string or table, got {}",
                other.type_str()
            ))),
        }
    }

    /// Table form written back to project files
    pub fn to_toml(&self) -> toml::Value {
        let mut table = toml::Table::new();
        match self {
            Dependency::Remote { name, constraint } => {
                table.insert("name".into(), name.clone().into());
                if let Some(constraint) = constraint {
                    table.insert("version".into(), constraint.clone().into());
                }
            }
            Dependency::Path { path, version } => {
                table.insert("path".into(), to_forward_slashes(path).into());
                if let Some(version) = version {
                    table.insert("version".into(), version.clone().into());
                }
            }
        }
        toml::Value::Table(table)
    }

    /// Requirement string handed to the index (`name` + constraint)
    pub fn requirement(&self) -> Option<String> {
        match self {
            Dependency::Remote { name, constraint } => Some(match constraint {
                Some(c) => format!("{}{}", name, c),
                None => name.clone(),
            }),
            Dependency::Path { .. } => None,
        }
    }

    /// Check if this dependency lives on the local filesystem
    pub fn is_path(&self) -> bool {
        matches!(self, Dependency::Path { .. })
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Remote { name, constraint } => {
                write!(f, "{}{}", name, constraint.as_deref().unwrap_or(""))
            }
            Dependency::Path { path, version } => {
                write!(f, "{}", to_forward_slashes(path))?;
                if let Some(version) = version {
                    write!(f, " ({})", version)?;
                }
                Ok(())
            }
        }
    }
}

/// Paths contain a separator, start with `.`, name a wheel file, or are absolute
fn is_path_like(input: &str) -> bool {
    input.contains('/')
        || input.contains('\\')
        || input.starts_with('.')
        || input.to_ascii_lowercase().ends_with(".whl")
        || Path::new(input).is_absolute()
}
