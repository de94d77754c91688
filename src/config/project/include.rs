//! Included files: `src[::dest]`

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, config};
use crate::path_utils::{is_contained_relative, to_forward_slashes};

/// Separator between source and destination
const DEST_SEPARATOR: &str = "::";

/// A file copied into the archive under `includes/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeSpec {
    /// Source file, relative to the project root or absolute
    pub src: PathBuf,
    /// Destination below `includes/`; defaults to the source file name
    pub dest: Option<String>,
}

impl IncludeSpec {
    pub fn parse(input: &str) -> Result<Self> {
        let (src, dest) = match input.split_once(DEST_SEPARATOR) {
            Some((src, dest)) => (src.trim(), Some(dest.trim())),
            None => (input.trim(), None),
        };

        if src.is_empty() {
            return Err(config::invalid(format!("include '{}' has no source path", input)));
        }

        let dest = match dest {
            None | Some("") => None,
            Some(dest) if is_contained_relative(dest) => Some(dest.to_string()),
            Some(dest) => {
                return Err(config::invalid(format!(
                    "include destination '{}' must be a relative path without '..'",
                    dest
                )));
            }
        };

        Ok(Self {
            src: PathBuf::from(src),
            dest,
        })
    }

    /// Destination path below `includes/`
    pub fn dest_name(&self) -> String {
        match &self.dest {
            Some(dest) => dest.clone(),
            None => self
                .src
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| to_forward_slashes(&self.src)),
        }
    }
}

impl fmt::Display for IncludeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_forward_slashes(&self.src))?;
        if let Some(dest) = &self.dest {
            write!(f, "{}{}", DEST_SEPARATOR, dest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_dest() {
        let spec = IncludeSpec::parse("docs/README.md").unwrap();
        assert_eq!(spec.src, PathBuf::from("docs/README.md"));
        assert_eq!(spec.dest, None);
        assert_eq!(spec.dest_name(), "README.md");
        assert_eq!(spec.to_string(), "docs/README.md");
    }

    #[test]
    fn test_parse_with_dest() {
        let spec = IncludeSpec::parse("conf/app.ini :: etc/app.ini").unwrap();
        assert_eq!(spec.src, PathBuf::from("conf/app.ini"));
        assert_eq!(spec.dest_name(), "etc/app.ini");
        assert_eq!(spec.to_string(), "conf/app.ini::etc/app.ini");
        assert_eq!(IncludeSpec::parse(&spec.to_string()).unwrap(), spec);
    }

    #[test]
    fn test_parse_rejects_escaping_dest() {
        assert!(IncludeSpec::parse("a.txt::../a.txt").is_err());
        assert!(IncludeSpec::parse("a.txt::/etc/a.txt").is_err());
        assert!(IncludeSpec::parse("::dest.txt").is_err());
    }
}
