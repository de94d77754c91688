//! Test fixtures for building wheels and project trees on disk.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, write_wheel};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     let wheel = write_wheel(
//!         temp.path(),
//!         "hello-1.0-py3-none-any.whl",
//!         &[("hello/__init__.py", "def main():\n    pass\n")],
//!     );
//! }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Write a text file, creating parent directories
///
/// # Panics
///
/// Panics on any IO failure.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// Write a minimal wheel (a zip archive) with the given entries
///
/// # Panics
///
/// Panics on any IO or zip failure.
pub fn write_wheel(dir: &Path, filename: &str, files: &[(&str, &str)]) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create wheel directory");
    let path = dir.join(filename);
    let file = std::fs::File::create(&path).expect("Failed to create wheel file");
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, content) in files {
        zip.start_file(*name, options).expect("Failed to start zip entry");
        zip.write_all(content.as_bytes())
            .expect("Failed to write zip entry");
    }

    zip.finish().expect("Failed to finish wheel");
    path
}

/// Write an empty but well-formed wheel
pub fn write_empty_wheel(dir: &Path, filename: &str) -> PathBuf {
    write_wheel(dir, filename, &[])
}
