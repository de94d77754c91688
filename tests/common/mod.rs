//! Common test utilities for pychub integration tests

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// A scratch Python project for integration tests
pub struct TestProject {
    /// Temporary project directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
    /// Isolated cache directory so downloads never touch the user's cache
    cache: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let cache = TempDir::new().expect("Failed to create cache directory");
        let path = temp.path().to_path_buf();
        Self { temp, path, cache }
    }

    /// Create a project named `app` with a built wheel in `dist/`
    pub fn with_app() -> Self {
        let project = Self::new();
        project.write_file("pyproject.toml", "[project]\nname = \"app\"\nversion = \"1.0\"\n");
        project.write_wheel("dist", "app-1.0-py3-none-any.whl", &app_wheel_files());
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write a minimal wheel under `dir` (relative to the project root)
    pub fn write_wheel(&self, dir: &str, filename: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.path.join(dir);
        std::fs::create_dir_all(&dir).expect("Failed to create wheel directory");
        let path = dir.join(filename);
        let file = std::fs::File::create(&path).expect("Failed to create wheel");
        let mut zip = zip::ZipWriter::new(file);
        for (name, content) in files {
            zip.start_file(*name, SimpleFileOptions::default())
                .expect("Failed to start wheel entry");
            zip.write_all(content.as_bytes())
                .expect("Failed to write wheel entry");
        }
        zip.finish().expect("Failed to finish wheel");
        path
    }

    /// `pychub` command running inside the project
    pub fn pychub(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("pychub").expect("Failed to find pychub binary");
        cmd.current_dir(&self.path)
            .env("XDG_CACHE_HOME", self.cache.path())
            .env_remove("RUST_LOG")
            .env_remove("PYCHUB_JOBS")
            .env_remove("PYCHUB_PYTHON");
        cmd
    }
}

/// Contents of the `app` wheel used by most tests
pub fn app_wheel_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("app/__init__.py", ""),
        ("app/cli.py", "import sys\n\ndef main():\n    return 0\n"),
        (
            "app-1.0.dist-info/entry_points.txt",
            "[console_scripts]\napp = app.cli:main\n",
        ),
    ]
}

/// Entry names of an archive, in archive order
pub fn archive_entries(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).expect("Failed to open archive");
    let zip = zip::ZipArchive::new(file).expect("Failed to read archive");
    zip.file_names().map(str::to_string).collect()
}

/// Text of one archive entry
#[allow(dead_code)]
pub fn archive_text(path: &Path, entry: &str) -> String {
    let file = std::fs::File::open(path).expect("Failed to open archive");
    let mut zip = zip::ZipArchive::new(file).expect("Failed to read archive");
    let mut text = String::new();
    zip.by_name(entry)
        .expect("Entry not in archive")
        .read_to_string(&mut text)
        .expect("Failed to read entry");
    text
}
