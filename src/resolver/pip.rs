//! [`WheelFetcher`] backed by `pip download`

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::remote::{FetchError, WheelFetcher};
use crate::wheel::{WHEEL_EXTENSION, normalize_name};

/// Default interpreter used to run pip
pub const DEFAULT_PYTHON: &str = "python3";

/// Downloads wheels with `python -m pip download --no-deps --only-binary=:all:`
#[derive(Debug)]
pub struct PipFetcher {
    python: String,
    dest: PathBuf,
    requests: AtomicUsize,
}

impl PipFetcher {
    /// Fetch into subdirectories of `dest` using the given interpreter
    pub fn new(python: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            dest: dest.into(),
            requests: AtomicUsize::new(0),
        }
    }

    /// Fresh directory for one download
    ///
    /// Every request gets its own directory, so two requirements on the
    /// same distribution never see each other's wheel.
    fn request_dir(&self, name: &str) -> PathBuf {
        let seq = self.requests.fetch_add(1, Ordering::Relaxed);
        self.dest.join(format!("{:04}-{}", seq, normalize_name(name)))
    }
}

impl WheelFetcher for PipFetcher {
    fn fetch(&self, name: &str, constraint: Option<&str>) -> Result<PathBuf, FetchError> {
        let requirement = format!("{}{}", name, constraint.unwrap_or(""));
        let target = self.request_dir(name);
        std::fs::create_dir_all(&target).map_err(|e| FetchError::Network {
            message: format!("cannot create {}: {}", target.display(), e),
        })?;

        tracing::debug!(python = %self.python, requirement = %requirement, "Running pip download");

        let output = Command::new(&self.python)
            .args(["-m", "pip", "download", "--no-deps", "--only-binary=:all:"])
            .arg("--dest")
            .arg(&target)
            .arg(&requirement)
            .output()
            .map_err(|e| FetchError::Network {
                message: format!("failed to run {}: {}", self.python, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&requirement, &stderr));
        }

        find_wheel(&target).ok_or_else(|| FetchError::Network {
            message: format!("pip reported success but no wheel for '{}' was saved", requirement),
        })
    }
}

/// Map pip's stderr to a fetch error
fn classify_failure(requirement: &str, stderr: &str) -> FetchError {
    if stderr.contains("No matching distribution") || stderr.contains("Could not find a version") {
        FetchError::NotFound {
            requirement: requirement.to_string(),
        }
    } else {
        let message = stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("pip download failed")
            .trim()
            .to_string();
        FetchError::Network { message }
    }
}

fn find_wheel(dir: &Path) -> Option<PathBuf> {
    let mut wheels: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(WHEEL_EXTENSION))
        })
        .collect();
    wheels.sort();
    wheels.into_iter().next()
}
