//! Entry names inside a `.chub` archive
//!
//! ```text
//! libs/<wheels, sorted by normalized file name>
//! scripts/pre/<pre-install scripts>
//! scripts/post/<post-install scripts>
//! includes/<dest>
//! .chubconfig
//! ```

use std::path::{Path, PathBuf};

use crate::path_utils::archive_path;
use crate::wheel::WheelFilename;

pub const LIBS_DIR: &str = "libs";
pub const PRE_SCRIPTS_DIR: &str = "scripts/pre";
pub const POST_SCRIPTS_DIR: &str = "scripts/post";
pub const INCLUDES_DIR: &str = "includes";

/// Manifest entry, always written last
pub const MANIFEST_FILE: &str = ".chubconfig";

/// Extension of the output archive
pub const CHUB_EXTENSION: &str = "chub";

/// Unix permissions for regular entries
pub const FILE_MODE: u32 = 0o644;

/// Unix permissions for install scripts
pub const SCRIPT_MODE: u32 = 0o755;

/// Kind of install script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Pre,
    Post,
}

impl ScriptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptKind::Pre => "pre",
            ScriptKind::Post => "post",
        }
    }

    pub fn dir(&self) -> &'static str {
        match self {
            ScriptKind::Pre => PRE_SCRIPTS_DIR,
            ScriptKind::Post => POST_SCRIPTS_DIR,
        }
    }
}

pub fn wheel_entry(filename: &str) -> String {
    archive_path(&[LIBS_DIR, filename])
}

pub fn script_entry(kind: ScriptKind, filename: &str) -> String {
    archive_path(&[kind.dir(), filename])
}

pub fn include_entry(dest: &str) -> String {
    archive_path(&[INCLUDES_DIR, dest])
}

/// `<project_root>/<name>-<version>.chub`
pub fn default_output(project_root: &Path, wheel: &WheelFilename) -> PathBuf {
    project_root.join(format!(
        "{}-{}.{}",
        wheel.name, wheel.version, CHUB_EXTENSION
    ))
}
