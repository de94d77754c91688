//! Dependency resolution for pychub
//!
//! This module handles:
//! - Locating the main wheel
//! - Resolving path dependencies against built `dist/` output
//! - Fetching remote requirements through a [`WheelFetcher`]
//! - Rejecting two dependencies that resolve to the same wheel
//!
//! Path dependencies are checked before anything is downloaded. Remote
//! requirements are fetched concurrently; results always follow declaration
//! order.

pub mod local;
pub mod pip;
pub mod remote;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, deps};
use crate::path_utils::resolve_against;
use crate::progress::FetchProgress;
use crate::source::Dependency;
use crate::wheel::WheelArtifact;

pub use pip::PipFetcher;
pub use remote::{DEFAULT_JOBS, FetchError, FetchRequest, WheelFetcher};

/// Turns declared dependencies into wheel files on disk
pub struct DependencyResolver {
    fetcher: Box<dyn WheelFetcher>,
    project_root: PathBuf,
    jobs: usize,
    show_progress: bool,
}

impl DependencyResolver {
    /// Create a resolver for a project rooted at `project_root`
    pub fn new(fetcher: Box<dyn WheelFetcher>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            project_root: project_root.into(),
            jobs: DEFAULT_JOBS,
            show_progress: false,
        }
    }

    /// Set the maximum number of concurrent downloads
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Show a progress bar while fetching
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Resolve the main wheel
    ///
    /// An explicit wheel must exist. Without one, the project root is
    /// resolved like a path dependency.
    pub fn resolve_main(&self, wheel: Option<&Path>) -> Result<WheelArtifact> {
        let dependency = Dependency::Path {
            path: wheel.map_or_else(|| PathBuf::from("."), Path::to_path_buf),
            version: None,
        };

        if let Some(wheel) = wheel {
            let full = resolve_against(&self.project_root, wheel);
            if !full.is_file() {
                return Err(deps::unresolved_path(
                    wheel.display().to_string(),
                    full.display().to_string(),
                ));
            }
            return WheelArtifact::new(dependency, full);
        }

        local::resolve_path(&dependency, &self.project_root)
    }

    /// Resolve every dependency, in declaration order
    pub fn resolve(&self, dependencies: &[Dependency]) -> Result<Vec<WheelArtifact>> {
        let mut slots: Vec<Option<WheelArtifact>> = vec![None; dependencies.len()];
        let mut requests = Vec::new();
        let mut remote_slots = Vec::new();

        for (index, dependency) in dependencies.iter().enumerate() {
            match dependency {
                Dependency::Path { .. } => {
                    let artifact = local::resolve_path(dependency, &self.project_root)?;
                    tracing::debug!(
                        dependency = %dependency,
                        wheel = %artifact.filename(),
                        "Resolved path dependency"
                    );
                    slots[index] = Some(artifact);
                }
                Dependency::Remote { name, constraint } => {
                    requests.push(FetchRequest {
                        name: name.as_str(),
                        constraint: constraint.as_deref(),
                    });
                    remote_slots.push(index);
                }
            }
        }

        if !requests.is_empty() {
            tracing::info!(count = requests.len(), jobs = self.jobs, "Fetching remote wheels");
            let progress = if self.show_progress {
                FetchProgress::new(requests.len() as u64)
            } else {
                FetchProgress::hidden()
            };

            let results = remote::fetch_all(self.fetcher.as_ref(), &requests, self.jobs, &progress)?;
            progress.finish();

            for (index, result) in remote_slots.into_iter().zip(results) {
                let dependency = &dependencies[index];
                let requirement = dependency
                    .requirement()
                    .unwrap_or_else(|| dependency.to_string());
                let path = result.map_err(|e| deps::remote(requirement, e))?;
                slots[index] = Some(WheelArtifact::new(dependency.clone(), path)?);
            }
        }

        let artifacts: Vec<WheelArtifact> = slots.into_iter().flatten().collect();
        ensure_unique(&artifacts)?;
        Ok(artifacts)
    }
}

/// Fail if two artifacts share a normalized name and version
pub fn ensure_unique(artifacts: &[WheelArtifact]) -> Result<()> {
    let mut seen: HashMap<(String, String), &WheelArtifact> = HashMap::new();

    for artifact in artifacts {
        if let Some(first) = seen.insert(artifact.wheel.identity(), artifact) {
            return Err(deps::duplicate(
                artifact.filename(),
                first.dependency.to_string(),
                artifact.dependency.to_string(),
            ));
        }
    }

    Ok(())
}
