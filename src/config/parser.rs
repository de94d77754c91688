//! Reading a project file under the table-location rules
//!
//! - `pyproject.toml`: only `[tool.pychub.package]` is read; a missing table
//!   means no configuration
//! - `chubproject*.toml`: one of `[tool.pychub.package]`, `[pychub.package]`
//!   or `[package]`, or the fields at the document root; top-level tables
//!   outside that set are rejected

use std::path::Path;

use super::project::serialization::{self, FIELD_KEYS};
use super::project::ProjectConfig;
use super::table::{FileKind, TableLocation};
use crate::error::{Result, config, fs};

/// Root keys that may hold a table while still being plain fields
const TABLE_FIELDS: &[&str] = &["metadata", "scripts"];

/// Parse `path`, optionally forcing a table location
///
/// Returns `Ok(None)` when the file carries no pychub configuration.
pub fn parse(path: &Path, requested: Option<&str>) -> Result<Option<ProjectConfig>> {
    let kind = FileKind::from_path(path)?;
    let requested = kind.check_table(requested, path)?;

    let content = std::fs::read_to_string(path).map_err(|e| fs::read_failed(path, e))?;
    let doc: toml::Table = toml::from_str(&content)
        .map_err(|e| config::parse_failed(path.display().to_string(), e.message().to_string()))?;

    let location = match kind {
        FileKind::Pyproject => {
            if lookup(&doc, TableLocation::ToolPychubPackage).is_some() {
                TableLocation::ToolPychubPackage
            } else if let Some(other) = [TableLocation::PychubPackage, TableLocation::Package]
                .into_iter()
                .find(|l| lookup(&doc, *l).is_some())
            {
                return Err(config::invalid_table(
                    other.as_str(),
                    path.display().to_string(),
                    "pyproject.toml only supports tool.pychub.package",
                ));
            } else {
                tracing::debug!(path = %path.display(), "No [tool.pychub.package] table");
                return Ok(None);
            }
        }
        FileKind::Chubproject => select_location(&doc, requested, path)?,
    };

    let Some(table) = lookup(&doc, location) else {
        return Err(config::invalid_table(
            location.as_str(),
            path.display().to_string(),
            "table not found in file",
        ));
    };

    tracing::debug!(path = %path.display(), table = %location, "Reading project table");

    Ok(serialization::from_table(table, path)?.map(|mut project| {
        project.table = location;
        project
    }))
}

/// Walk to a table location; `Flat` is the document itself
pub fn lookup(doc: &toml::Table, location: TableLocation) -> Option<&toml::Table> {
    location
        .keys()
        .iter()
        .try_fold(doc, |table, key| table.get(*key).and_then(toml::Value::as_table))
}

/// Decide which table of a chubproject file to read
fn select_location(
    doc: &toml::Table,
    requested: Option<TableLocation>,
    path: &Path,
) -> Result<TableLocation> {
    let headers = detect_headers(doc, path)?;
    let has_root_fields = doc
        .iter()
        .any(|(key, value)| FIELD_KEYS.contains(&key.as_str()) && !is_header_key(key, value));

    match headers.as_slice() {
        [] => {}
        [header] if has_root_fields => {
            return Err(config::invalid_table(
                header.as_str(),
                path.display().to_string(),
                "fields appear both at the document root and in the table",
            ));
        }
        [_] => {}
        [first, ..] => {
            let names: Vec<&str> = headers.iter().map(TableLocation::as_str).collect();
            return Err(config::invalid_table(
                first.as_str(),
                path.display().to_string(),
                format!("more than one pychub table: {}", names.join(", ")),
            ));
        }
    }

    match requested {
        Some(TableLocation::Flat) if !headers.is_empty() => Err(config::invalid_table(
            TableLocation::Flat.as_str(),
            path.display().to_string(),
            format!("file uses a [{}] table", headers[0]),
        )),
        Some(location) => Ok(location),
        None => Ok(headers.first().copied().unwrap_or(TableLocation::Flat)),
    }
}

fn is_header_key(key: &str, value: &toml::Value) -> bool {
    value.is_table() && !TABLE_FIELDS.contains(&key)
}

/// Find the dotted pychub tables present, rejecting any other table header
fn detect_headers(doc: &toml::Table, path: &Path) -> Result<Vec<TableLocation>> {
    let mut headers = Vec::new();

    for (key, value) in doc {
        if !is_header_key(key, value) {
            continue;
        }

        let location = TableLocation::ALL
            .into_iter()
            .filter(|l| l.keys().first() == Some(&key.as_str()))
            .find(|l| is_exact_chain(doc, l.keys()));

        match location {
            Some(location) => headers.push(location),
            None => {
                return Err(config::invalid_table(
                    describe_header(key, value),
                    path.display().to_string(),
                    "not a pychub table",
                ));
            }
        }
    }

    headers.sort_by_key(|h| TableLocation::ALL.iter().position(|l| l == h));
    Ok(headers)
}

/// Every table on the way to the last key holds nothing but the next key
fn is_exact_chain(doc: &toml::Table, keys: &[&str]) -> bool {
    let mut table = doc;
    for (depth, key) in keys.iter().enumerate() {
        if depth > 0 && table.len() != 1 {
            return false;
        }
        match table.get(*key).and_then(toml::Value::as_table) {
            Some(next) => table = next,
            None => return false,
        }
    }
    true
}

/// Dotted name of the first nested table, for error messages
fn describe_header(key: &str, value: &toml::Value) -> String {
    let mut name = key.to_string();
    let mut current = value;
    while let Some(table) = current.as_table() {
        match table.iter().find(|(_, v)| v.is_table()) {
            Some((k, v)) if table.len() == 1 => {
                name.push('.');
                name.push_str(k);
                current = v;
            }
            _ => break,
        }
    }
    name
}
