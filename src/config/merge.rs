//! Layering command-line values over a parsed project file

use std::path::PathBuf;

use super::project::{IncludeSpec, MetadataEntry, ProjectConfig};
use super::table::TableLocation;
use crate::source::Dependency;

/// Values supplied on the command line; empty lists mean "not supplied"
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub wheel: Option<PathBuf>,
    pub add_wheels: Vec<Dependency>,
    pub includes: Vec<IncludeSpec>,
    pub entrypoint: Option<String>,
    pub entrypoint_args: Vec<String>,
    pub metadata: Vec<MetadataEntry>,
    pub pre_scripts: Vec<PathBuf>,
    pub post_scripts: Vec<PathBuf>,
    pub chub: Option<PathBuf>,
    pub table: Option<TableLocation>,
}

/// Merge overrides into a parsed config (or the defaults)
///
/// Scalars given on the command line replace the file's values and
/// `entrypoint_args` is replaced as a whole. Wheels, includes, metadata and
/// scripts accumulate: command-line entries follow the file's.
pub fn merge(parsed: Option<ProjectConfig>, cli: CliOverrides) -> ProjectConfig {
    let mut config = parsed.unwrap_or_default();

    replace(&mut config.wheel, cli.wheel);
    replace(&mut config.entrypoint, cli.entrypoint);
    replace(&mut config.chub, cli.chub);
    if let Some(table) = cli.table {
        config.table = table;
    }

    if !cli.entrypoint_args.is_empty() {
        config.entrypoint_args = cli.entrypoint_args;
    }

    config.add_wheels.extend(cli.add_wheels);
    config.includes.extend(cli.includes);
    config.metadata.extend(cli.metadata);
    config.pre_scripts.extend(cli.pre_scripts);
    config.post_scripts.extend(cli.post_scripts);

    config
}

fn replace<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
