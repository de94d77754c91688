//! Path dependency resolution
//!
//! A path dependency names either a wheel file or a project directory. For a
//! directory, the wheel is looked up among the built artifacts in its `dist/`
//! directory:
//! - The package name comes from `pyproject.toml` (`[project].name`, then
//!   `[tool.poetry].name`), or the directory name when there is none
//! - Wheels whose normalized name matches are candidates
//! - An optional version pin narrows the candidates
//! - Exactly one candidate must remain

use std::path::{Path, PathBuf};

use crate::error::{Result, config, deps, fs};
use crate::path_utils::resolve_against;
use crate::source::Dependency;
use crate::wheel::{WHEEL_EXTENSION, WheelArtifact, WheelFilename, normalize_name};

/// Build output directory searched for wheels
pub const DIST_DIR: &str = "dist";

/// Resolve a `Dependency::Path` relative to `project_root`
pub fn resolve_path(dependency: &Dependency, project_root: &Path) -> Result<WheelArtifact> {
    let Dependency::Path { path, version } = dependency else {
        return Err(config::invalid(format!(
            "'{}' is not a path dependency",
            dependency
        )));
    };

    let full = resolve_against(project_root, path);

    if is_wheel_file(&full) {
        if !full.is_file() {
            return Err(deps::unresolved_path(
                file_name(&full),
                full.display().to_string(),
            ));
        }
        return WheelArtifact::new(dependency.clone(), full);
    }

    if !full.is_dir() {
        return Err(deps::unresolved_path(
            path.display().to_string(),
            full.display().to_string(),
        ));
    }

    let name = project_name(&full)?;
    let dist = full.join(DIST_DIR);
    let mut candidates = find_candidates(&dist, &name, version.as_deref())?;

    tracing::debug!(
        name = %name,
        dist = %dist.display(),
        candidates = candidates.len(),
        "Searched build output"
    );

    match candidates.len() {
        0 => Err(deps::unresolved_path(name, dist.display().to_string())),
        1 => WheelArtifact::new(dependency.clone(), candidates.remove(0)),
        _ => {
            let names: Vec<String> = candidates.iter().map(|p| file_name(p)).collect();
            Err(deps::ambiguous_path(name, dist.display().to_string(), &names))
        }
    }
}

/// Package name of a Python project directory
pub fn project_name(dir: &Path) -> Result<String> {
    let pyproject = dir.join("pyproject.toml");

    if pyproject.is_file() {
        let content =
            std::fs::read_to_string(&pyproject).map_err(|e| fs::read_failed(&pyproject, e))?;
        let doc: toml::Table = toml::from_str(&content).map_err(|e| {
            config::parse_failed(pyproject.display().to_string(), e.message().to_string())
        })?;

        let declared = doc
            .get("project")
            .and_then(|p| p.get("name"))
            .or_else(|| {
                doc.get("tool")
                    .and_then(|t| t.get("poetry"))
                    .and_then(|p| p.get("name"))
            })
            .and_then(toml::Value::as_str);

        if let Some(name) = declared {
            return Ok(name.to_string());
        }
    }

    let canonical = dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| deps::unresolved_path("<unnamed>", dir.display().to_string()))
}

/// Wheels in `dist` matching `name` (and `version`, if pinned), sorted by file name
fn find_candidates(dist: &Path, name: &str, version: Option<&str>) -> Result<Vec<PathBuf>> {
    if !dist.is_dir() {
        return Ok(Vec::new());
    }

    let wanted = normalize_name(name);
    let entries = std::fs::read_dir(dist).map_err(|e| fs::read_failed(dist, e))?;
    let mut candidates = Vec::new();

    for entry in entries {
        let path = entry.map_err(|e| fs::read_failed(dist, e))?.path();
        if !path.is_file() || !is_wheel_file(&path) {
            continue;
        }

        let wheel = match WheelFilename::from_path(&path) {
            Ok(wheel) => wheel,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Skipping unparseable wheel");
                continue;
            }
        };

        if wheel.normalized_name() != wanted {
            continue;
        }
        if version.is_some_and(|v| !wheel.version.eq_ignore_ascii_case(v)) {
            continue;
        }

        candidates.push(path);
    }

    candidates.sort();
    Ok(candidates)
}

fn is_wheel_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(WHEEL_EXTENSION))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
