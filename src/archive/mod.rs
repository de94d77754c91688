//! Chub archive assembly
//!
//! Every input is checked before staging starts: wheel file names must be
//! unique, the entrypoint must exist in the main wheel, and scripts and
//! included files must exist with distinct destinations. The archive is
//! then written in a fixed order (wheels, scripts, includes, manifest) and
//! promoted onto the output path in one rename.

pub mod entrypoint;
pub mod layout;
pub mod manifest;
pub mod writer;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::error::{Result, archive};
use crate::hash::hash_file;
use crate::path_utils::resolve_against;
use crate::wheel::WheelArtifact;

use layout::{FILE_MODE, SCRIPT_MODE, ScriptKind};
pub use manifest::{ChubManifest, ManifestScripts, ManifestWheel};
use writer::StagedArchive;

/// A committed archive and the manifest written into it
#[derive(Debug, Clone)]
pub struct BuiltArchive {
    pub path: PathBuf,
    pub manifest: ChubManifest,
}

/// One file scheduled for the archive
#[derive(Debug, Clone)]
struct PlannedEntry {
    name: String,
    source: PathBuf,
    mode: u32,
}

/// Assembles `.chub` archives for a project
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    project_root: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Where the archive for `config` will be written
    pub fn output_path(&self, config: &ProjectConfig, main: &WheelArtifact) -> PathBuf {
        match &config.chub {
            Some(chub) => resolve_against(&self.project_root, chub),
            None => layout::default_output(&self.project_root, &main.wheel),
        }
    }

    /// Build the archive for `main` plus `extras`
    pub fn build(
        &self,
        config: &ProjectConfig,
        main: &WheelArtifact,
        extras: &[WheelArtifact],
    ) -> Result<BuiltArchive> {
        let wheels = ordered_wheels(main, extras)?;

        if let Some(spec) = &config.entrypoint {
            entrypoint::validate(spec, main)?;
        }

        let scripts = self.plan_scripts(config)?;
        let includes = self.plan_includes(config)?;

        let mut manifest_wheels = Vec::with_capacity(wheels.len());
        let mut entries = Vec::with_capacity(wheels.len() + scripts.len() + includes.len());

        for artifact in &wheels {
            let name = layout::wheel_entry(&artifact.filename());
            manifest_wheels.push(ManifestWheel {
                file: name.clone(),
                name: artifact.wheel.name.clone(),
                version: artifact.wheel.version.clone(),
                hash: hash_file(&artifact.path)?,
                primary: std::ptr::eq(*artifact, main),
            });
            entries.push(PlannedEntry {
                name,
                source: artifact.path.clone(),
                mode: FILE_MODE,
            });
        }

        let mut manifest_scripts = ManifestScripts::default();
        for (kind, entry) in scripts {
            match kind {
                ScriptKind::Pre => manifest_scripts.pre.push(entry.name.clone()),
                ScriptKind::Post => manifest_scripts.post.push(entry.name.clone()),
            }
            entries.push(entry);
        }

        let manifest_includes = includes.iter().map(|e| e.name.clone()).collect();
        entries.extend(includes);

        let manifest = ChubManifest {
            name: main.wheel.name.clone(),
            version: main.wheel.version.clone(),
            entrypoint: config.entrypoint.clone(),
            entrypoint_args: config.entrypoint_args.clone(),
            wheels: manifest_wheels,
            scripts: manifest_scripts,
            includes: manifest_includes,
            metadata: config.metadata.clone(),
        };
        let manifest_yaml = manifest.to_yaml()?;

        let output = self.output_path(config, main);
        tracing::info!(
            output = %output.display(),
            wheels = wheels.len(),
            entries = entries.len() + 1,
            "Writing archive"
        );

        let mut staged = StagedArchive::create(&output)?;
        for entry in &entries {
            staged.add_file(&entry.name, &entry.source, entry.mode)?;
        }
        staged.add_bytes(layout::MANIFEST_FILE, manifest_yaml.as_bytes(), FILE_MODE)?;
        let path = staged.commit()?;

        Ok(BuiltArchive { path, manifest })
    }

    /// Pre scripts then post scripts, each in declaration order
    fn plan_scripts(&self, config: &ProjectConfig) -> Result<Vec<(ScriptKind, PlannedEntry)>> {
        let mut planned: Vec<(ScriptKind, PlannedEntry)> = Vec::new();

        for (kind, scripts) in [
            (ScriptKind::Pre, &config.pre_scripts),
            (ScriptKind::Post, &config.post_scripts),
        ] {
            for script in scripts {
                let source = resolve_against(&self.project_root, script);
                if !source.is_file() {
                    return Err(archive::missing_script(
                        kind.as_str(),
                        source.display().to_string(),
                    ));
                }

                let name = layout::script_entry(kind, &file_name(&source));
                if let Some((_, existing)) = planned.iter().find(|(_, e)| e.name == name) {
                    if existing.source == source {
                        continue;
                    }
                    return Err(archive::script_collision(name));
                }
                planned.push((
                    kind,
                    PlannedEntry {
                        name,
                        source,
                        mode: SCRIPT_MODE,
                    },
                ));
            }
        }

        Ok(planned)
    }

    /// Includes sorted by archive path
    fn plan_includes(&self, config: &ProjectConfig) -> Result<Vec<PlannedEntry>> {
        let mut planned: BTreeMap<String, PlannedEntry> = BTreeMap::new();

        for include in &config.includes {
            let source = resolve_against(&self.project_root, &include.src);
            if !source.is_file() {
                return Err(archive::missing_include(source.display().to_string()));
            }

            let name = layout::include_entry(&include.dest_name());
            if let Some(existing) = planned.get(&name) {
                // Same file listed twice, e.g. in the project file and on the command line
                if existing.source == source {
                    continue;
                }
                return Err(archive::include_collision(name));
            }
            planned.insert(
                name.clone(),
                PlannedEntry {
                    name,
                    source,
                    mode: FILE_MODE,
                },
            );
        }

        Ok(planned.into_values().collect())
    }
}

/// Main wheel and extras sorted by normalized file name
///
/// Two wheels with the same file name (ignoring case) are rejected.
fn ordered_wheels<'a>(
    main: &'a WheelArtifact,
    extras: &'a [WheelArtifact],
) -> Result<Vec<&'a WheelArtifact>> {
    let mut seen = HashSet::new();
    let mut wheels: Vec<&WheelArtifact> = Vec::with_capacity(extras.len() + 1);

    for artifact in std::iter::once(main).chain(extras) {
        let filename = artifact.filename();
        if !seen.insert(filename.to_lowercase()) {
            return Err(archive::wheel_collision(filename));
        }
        wheels.push(artifact);
    }

    wheels.sort_by_key(|a| (a.wheel.sort_key(), a.filename()));
    Ok(wheels)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
