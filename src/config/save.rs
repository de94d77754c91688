//! Writing a config back to a project file
//!
//! The table choice and the config are validated before anything touches
//! the disk. The file is written to a temp file next to the target and
//! renamed into place.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::parser::lookup;
use super::project::{ProjectConfig, serialization};
use super::table::{FileKind, TableLocation};
use crate::error::{Result, config, fs};

/// Save `project` into `target`
///
/// Without an explicit table, pyproject files use `tool.pychub.package`
/// and chubproject files use the config's own table. An existing
/// `pyproject.toml` keeps all of its other tables.
pub fn save(project: &ProjectConfig, target: &Path, table: Option<&str>) -> Result<PathBuf> {
    let kind = FileKind::from_path(target)?;
    let location = match (kind.check_table(table, target)?, kind) {
        (Some(location), _) => location,
        (None, FileKind::Pyproject) => TableLocation::ToolPychubPackage,
        (None, FileKind::Chubproject) => project.table,
    };
    project.validate()?;

    let body = serialization::to_table(project);
    let doc = match kind {
        FileKind::Pyproject if target.is_file() => {
            let content = std::fs::read_to_string(target).map_err(|e| fs::read_failed(target, e))?;
            let existing: toml::Table = toml::from_str(&content).map_err(|e| {
                config::parse_failed(target.display().to_string(), e.message().to_string())
            })?;
            place(existing, location, body, target)?
        }
        _ => place(toml::Table::new(), location, body, target)?,
    };

    let text = toml::to_string(&doc)?;
    write_atomic(target, text.as_bytes())?;

    tracing::info!(path = %target.display(), table = %location, "Saved project file");
    Ok(target.to_path_buf())
}

/// Put `body` at `location` inside `doc`, creating intermediate tables
fn place(
    mut doc: toml::Table,
    location: TableLocation,
    body: toml::Table,
    target: &Path,
) -> Result<toml::Table> {
    let Some((last, parents)) = location.keys().split_last() else {
        return Ok(body);
    };

    let mut current = &mut doc;
    for key in parents {
        let entry = current
            .entry(key.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        current = entry.as_table_mut().ok_or_else(|| {
            config::invalid_table(
                location.as_str(),
                target.display().to_string(),
                format!("'{}' exists and is not a table", key),
            )
        })?;
    }
    current.insert(last.to_string(), toml::Value::Table(body));

    debug_assert!(lookup(&doc, location).is_some());
    Ok(doc)
}

/// Write through a temp file in the target directory, then rename
pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(|e| fs::write_failed(&parent, e))?;

    let mut temp = NamedTempFile::new_in(&parent).map_err(|e| fs::write_failed(target, e))?;
    temp.write_all(bytes).map_err(|e| fs::write_failed(target, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| fs::write_failed(target, e))?;
    temp.persist(target)
        .map_err(|e| fs::write_failed(target, e.error))?;
    Ok(())
}
