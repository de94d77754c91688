//! CLI definitions using clap derive API
//!
//! pychub has a single command: build a `.chub` from the wheel in the
//! current project, or save the merged configuration with
//! `--chubproject-save`.

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// pychub - bundle a Python wheel and its dependencies into one archive
#[derive(Parser, Debug)]
#[command(
    name = "pychub",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Package a Python wheel and its dependencies into a single .chub archive",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  pychub                                      \x1b[90m# Build from dist/ and the project file\x1b[0m\n   \
                  pychub dist/app-1.0-py3-none-any.whl -e app.cli:main\n   \
                  pychub --add-wheel 'requests>=2.31' -i README.md::docs/README.md\n   \
                  pychub --chubproject-save chubproject.toml  \x1b[90m# Save the merged options\x1b[0m\n"
)]
pub struct Cli {
    /// Main wheel (defaults to the single matching wheel in <project>/dist)
    pub wheel: Option<PathBuf>,

    /// Extra wheel: a requirement (`requests>=2`) or a path (`../lib`, `x.whl`)
    #[arg(long = "add-wheel", value_name = "DEP")]
    pub add_wheels: Vec<String>,

    /// Output archive path (defaults to <project>/<name>-<version>.chub)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub chub: Option<PathBuf>,

    /// Project file to read (pyproject.toml or *chubproject*.toml)
    #[arg(long, value_name = "PATH")]
    pub chubproject: Option<PathBuf>,

    /// Save the merged configuration to this file and exit without building
    #[arg(long = "chubproject-save", value_name = "PATH")]
    pub chubproject_save: Option<PathBuf>,

    /// Table to read or save: flat, tool.pychub.package, pychub.package, package
    #[arg(long, short = 't', value_name = "TABLE")]
    pub table: Option<String>,

    /// Entrypoint: `module:callable` or a console script of the main wheel
    #[arg(long, short = 'e', value_name = "SPEC")]
    pub entrypoint: Option<String>,

    /// Default argument for the entrypoint (repeatable)
    #[arg(long = "entrypoint-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub entrypoint_args: Vec<String>,

    /// Extra file to include, `src[::dest]` (repeatable)
    #[arg(long = "include", short = 'i', value_name = "SRC[::DEST]")]
    pub includes: Vec<String>,

    /// Metadata entry, `key=value` (repeatable)
    #[arg(long = "metadata-entry", short = 'm', value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,

    /// Script to run before installing the wheels (repeatable)
    #[arg(long = "pre-script", value_name = "PATH")]
    pub pre_scripts: Vec<PathBuf>,

    /// Script to run after installing the wheels (repeatable)
    #[arg(long = "post-script", value_name = "PATH")]
    pub post_scripts: Vec<PathBuf>,

    /// Project directory; relative paths in the configuration resolve against it
    #[arg(long = "project-path", value_name = "DIR", default_value = ".")]
    pub project_path: PathBuf,

    /// Maximum concurrent downloads
    #[arg(long, short = 'j', env = "PYCHUB_JOBS", default_value_t = crate::resolver::DEFAULT_JOBS)]
    pub jobs: usize,

    /// Python interpreter used to run pip
    #[arg(long, env = "PYCHUB_PYTHON", default_value = crate::resolver::pip::DEFAULT_PYTHON)]
    pub python: String,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
