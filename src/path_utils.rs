//! Path helpers for archive entry names and project-relative paths

use std::path::{Component, Path, PathBuf};

/// Render a path with forward slashes, as used inside archives and TOML files
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Join a relative path onto `root`; absolute paths are returned as-is
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Whether `dest` is a relative path that stays inside its parent
///
/// Rejects absolute paths, drive prefixes and any `..` component.
pub fn is_contained_relative(dest: &str) -> bool {
    let path = Path::new(dest);
    !dest.is_empty()
        && !dest.starts_with('/')
        && !dest.starts_with('\\')
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Join archive path segments with `/`, dropping empty ones
pub fn archive_path(segments: &[&str]) -> String {
    segments
        .iter()
        .flat_map(|s| s.split(['/', '\\']))
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}
