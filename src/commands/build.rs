//! Build command implementation
//!
//! 1. Find and parse the project file
//! 2. Merge command-line values over it
//! 3. Either save the result (`--chubproject-save`) or
//! 4. resolve the main wheel and extra wheels, then write the archive

use std::path::{Path, PathBuf};

use console::Style;
use normpath::PathExt;

use crate::archive::ArchiveBuilder;
use crate::cli::Cli;
use crate::config::{self, CliOverrides, IncludeSpec, MetadataEntry, ProjectConfig, TableLocation};
use crate::error::{Result, fs};
use crate::resolver::{DependencyResolver, PipFetcher};
use crate::source::Dependency;
use crate::temp::download_dir_base;

/// Run the build (or save) for parsed arguments
pub fn run(args: Cli) -> Result<()> {
    let project_root = project_root(&args.project_path)?;
    tracing::debug!(root = %project_root.display(), "Project root");

    let config = load_config(&project_root, &args)?;

    if let Some(target) = &args.chubproject_save {
        let saved = config::save(&config, target, args.table.as_deref())?;
        println!(
            "{} {}",
            Style::new().green().bold().apply_to("Saved"),
            saved.display()
        );
        return Ok(());
    }

    build(&project_root, &config, &args)
}

/// Discover, parse and merge the configuration
///
/// With `--chubproject-save`, `--table` names the table to write, so the
/// source file is read from whatever table it declares.
fn load_config(project_root: &Path, args: &Cli) -> Result<ProjectConfig> {
    let overrides = overrides(args)?;
    let read_table = match args.chubproject_save {
        Some(_) => None,
        None => args.table.as_deref(),
    };

    let parsed = match config::discover(project_root, args.chubproject.as_deref())? {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using project file");
            config::parse(&path, read_table)?
        }
        None => {
            tracing::debug!("No project file found, using command-line values only");
            None
        }
    };

    let merged = config::merge(parsed, overrides);
    merged.validate()?;
    Ok(merged)
}

/// Translate raw arguments into typed overrides
fn overrides(args: &Cli) -> Result<CliOverrides> {
    let table = match args.table.as_deref() {
        Some(name) => Some(TableLocation::parse(name).ok_or_else(|| {
            crate::error::config::invalid_table(name, "command line", "unknown table name")
        })?),
        None => None,
    };

    Ok(CliOverrides {
        wheel: args.wheel.clone(),
        add_wheels: args
            .add_wheels
            .iter()
            .map(|d| Dependency::parse(d))
            .collect::<Result<_>>()?,
        includes: args
            .includes
            .iter()
            .map(|i| IncludeSpec::parse(i))
            .collect::<Result<_>>()?,
        entrypoint: args.entrypoint.clone(),
        entrypoint_args: args.entrypoint_args.clone(),
        metadata: args
            .metadata
            .iter()
            .map(|m| MetadataEntry::parse(m))
            .collect::<Result<_>>()?,
        pre_scripts: args.pre_scripts.clone(),
        post_scripts: args.post_scripts.clone(),
        chub: args.chub.clone(),
        table,
    })
}

fn build(project_root: &Path, config: &ProjectConfig, args: &Cli) -> Result<()> {
    let downloads = download_dir()?;
    let fetcher = PipFetcher::new(args.python.clone(), downloads.path());
    let resolver = DependencyResolver::new(Box::new(fetcher), project_root)
        .with_jobs(args.jobs)
        .with_progress(console::Term::stderr().is_term());

    let main = resolver.resolve_main(config.wheel.as_deref())?;
    tracing::info!(wheel = %main.filename(), "Main wheel");

    let local = config.add_wheels.iter().filter(|d| d.is_path()).count();
    tracing::debug!(
        path = local,
        remote = config.add_wheels.len() - local,
        "Resolving extra wheels"
    );
    let extras = resolver.resolve(&config.add_wheels)?;
    for artifact in &extras {
        tracing::info!(dependency = %artifact.dependency, wheel = %artifact.filename(), "Resolved");
    }

    let built = ArchiveBuilder::new(project_root).build(config, &main, &extras)?;

    let count = built.manifest.wheels.len();
    println!(
        "{} {} ({} wheel{})",
        Style::new().green().bold().apply_to("Built"),
        built.path.display(),
        count,
        if count == 1 { "" } else { "s" }
    );
    if let Some(primary) = built.manifest.primary_wheel() {
        println!(
            "  {} {}",
            Style::new().dim().apply_to("main:"),
            primary.file
        );
    }
    Ok(())
}

/// Absolute project root
fn project_root(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(fs::read_failed(path, "project path is not a directory"));
    }
    Ok(path
        .normalize()
        .map(|np| np.into_path_buf())
        .unwrap_or_else(|_| path.to_path_buf()))
}

/// Per-invocation download directory, removed when dropped
fn download_dir() -> Result<tempfile::TempDir> {
    let base = download_dir_base();
    std::fs::create_dir_all(&base).map_err(|e| fs::write_failed(&base, e))?;
    tempfile::Builder::new()
        .prefix("run-")
        .tempdir_in(&base)
        .map_err(|e| fs::write_failed(&base, e))
}
