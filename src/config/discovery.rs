//! Project file discovery
//!
//! With an explicit path the file name is validated and the file must exist.
//! Otherwise the project root's direct children are scanned: every
//! `chubproject*.toml` is a candidate, and so is a `pyproject.toml` that
//! carries a `[tool.pychub.package]` table. More than one candidate is an
//! error; none means defaults apply.

use std::path::{Path, PathBuf};

use super::table::{FileKind, TableLocation};
use crate::error::{Result, config, fs};

/// Find the project file to read, if any
pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        FileKind::from_path(path)?;
        if !path.is_file() {
            return Err(config::not_found(path.display().to_string()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let entries = std::fs::read_dir(root).map_err(|e| fs::read_failed(root, e))?;
    let mut candidates = Vec::new();

    for entry in entries {
        let path = entry.map_err(|e| fs::read_failed(root, e))?.path();
        if !path.is_file() {
            continue;
        }
        let Some(kind) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(FileKind::from_name)
        else {
            continue;
        };

        if kind == FileKind::Pyproject && !has_pychub_table(&path) {
            tracing::debug!(path = %path.display(), "pyproject.toml has no pychub table");
            continue;
        }
        candidates.push(path);
    }

    candidates.sort();

    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            Err(config::ambiguous(root.display().to_string(), &names))
        }
    }
}

/// Whether a pyproject file declares `[tool.pychub.package]`
fn has_pychub_table(path: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(path) else {
        return false;
    };
    match toml::from_str::<toml::Table>(&content) {
        Ok(doc) => super::parser::lookup(&doc, TableLocation::ToolPychubPackage).is_some(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e.message(), "Ignoring unparseable pyproject.toml");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PychubError;
    use crate::test_fixtures::{create_temp_dir, write_file};

    #[test]
    fn test_no_candidates() {
        let temp = create_temp_dir();
        write_file(temp.path(), "README.md", "# hi");
        assert_eq!(discover(temp.path(), None).unwrap(), None);
    }

    #[test]
    fn test_single_chubproject() {
        let temp = create_temp_dir();
        let path = write_file(temp.path(), "my-chubproject.toml", "wheel = \"x.whl\"\n");
        assert_eq!(discover(temp.path(), None).unwrap(), Some(path));
    }

    #[test]
    fn test_pyproject_without_table_is_skipped() {
        let temp = create_temp_dir();
        write_file(temp.path(), "pyproject.toml", "[project]\nname = \"app\"\n");
        let chub = write_file(temp.path(), "chubproject.toml", "");
        assert_eq!(discover(temp.path(), None).unwrap(), Some(chub));
    }

    #[test]
    fn test_pyproject_with_table_competes() {
        let temp = create_temp_dir();
        write_file(
            temp.path(),
            "pyproject.toml",
            "[tool.pychub.package]\nwheel = \"x.whl\"\n",
        );
        write_file(temp.path(), "chubproject.toml", "");

        let err = discover(temp.path(), None).unwrap_err();
        match err {
            PychubError::AmbiguousConfig { candidates, .. } => {
                assert_eq!(candidates, "chubproject.toml, pyproject.toml");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_path() {
        let temp = create_temp_dir();
        let path = write_file(temp.path(), "ci_chubproject.toml", "");
        write_file(temp.path(), "chubproject.toml", "");
        assert_eq!(discover(temp.path(), Some(&path)).unwrap(), Some(path));

        let bad = write_file(temp.path(), "settings.toml", "");
        assert!(matches!(
            discover(temp.path(), Some(&bad)),
            Err(PychubError::InvalidFilename { .. })
        ));

        let missing = temp.path().join("other-chubproject.toml");
        assert!(matches!(
            discover(temp.path(), Some(&missing)),
            Err(PychubError::ConfigNotFound { .. })
        ));
    }
}
