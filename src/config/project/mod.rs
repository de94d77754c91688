//! Project configuration data structures
//!
//! A [`ProjectConfig`] is what a project file (or the command line) says
//! about one build: the main wheel, extra wheels, files to include, the
//! entrypoint, metadata and install scripts.

pub mod include;
pub mod metadata;
pub mod serialization;

use std::path::PathBuf;

use crate::config::table::TableLocation;
use crate::error::{Result, config};
use crate::source::Dependency;

pub use include::IncludeSpec;
pub use metadata::MetadataEntry;

/// Settings for one chub build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Main wheel; when absent the project's own `dist/` is searched
    pub wheel: Option<PathBuf>,
    /// Extra wheels to bundle
    pub add_wheels: Vec<Dependency>,
    /// Auxiliary files
    pub includes: Vec<IncludeSpec>,
    /// `module:callable` or a console script name
    pub entrypoint: Option<String>,
    /// Default arguments passed to the entrypoint
    pub entrypoint_args: Vec<String>,
    /// Metadata entries, in declaration order
    pub metadata: Vec<MetadataEntry>,
    /// Scripts run before installing, in order
    pub pre_scripts: Vec<PathBuf>,
    /// Scripts run after installing, in order
    pub post_scripts: Vec<PathBuf>,
    /// Output archive path
    pub chub: Option<PathBuf>,
    /// Table the config was read from or will be saved to
    pub table: TableLocation,
}

impl ProjectConfig {
    /// Check field-level invariants that parsing alone cannot guarantee
    pub fn validate(&self) -> Result<()> {
        if let Some(entrypoint) = &self.entrypoint {
            if entrypoint.trim().is_empty() {
                return Err(config::invalid("entrypoint must not be empty"));
            }
        }

        if let Some(entry) = self.metadata.iter().find(|m| m.key.trim().is_empty()) {
            return Err(config::invalid(format!(
                "metadata entry '{}' has an empty key",
                entry
            )));
        }

        let single = [("wheel", &self.wheel), ("chub", &self.chub)]
            .into_iter()
            .filter_map(|(label, path)| path.as_ref().map(|p| (label, p)));
        let scripts = self
            .pre_scripts
            .iter()
            .map(|p| ("pre_scripts", p))
            .chain(self.post_scripts.iter().map(|p| ("post_scripts", p)));
        for (label, path) in single.chain(scripts) {
            if path.as_os_str().is_empty() {
                return Err(config::invalid(format!("{} must not be an empty path", label)));
            }
        }

        Ok(())
    }
}
