//! Read-only view of what a wheel ships
//!
//! Used to check an entrypoint against the modules and console scripts a
//! wheel actually provides.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{Result, fs};

/// Extensions of compiled Python extension modules
const EXTENSION_SUFFIXES: &[&str] = &[".so", ".pyd"];

/// How a module is present in a wheel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleFile {
    /// Pure Python source, with its text
    Source(String),
    /// Compiled extension; its symbols cannot be inspected
    Extension,
}

/// File listing and entry points of a wheel
#[derive(Debug, Clone)]
pub struct WheelContents {
    path: PathBuf,
    names: Vec<String>,
    scripts: BTreeMap<String, String>,
}

impl WheelContents {
    /// Open a wheel and read its listing and `entry_points.txt`
    pub fn read(path: &Path) -> Result<Self> {
        let mut archive = open(path)?;
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();

        let entry_points_name = names
            .iter()
            .find(|n| {
                n.split_once('/').is_some_and(|(dir, file)| {
                    dir.ends_with(".dist-info") && file == "entry_points.txt"
                })
            })
            .cloned();

        let scripts = match entry_points_name {
            Some(name) => parse_console_scripts(&read_entry(&mut archive, path, &name)?),
            None => BTreeMap::new(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            names,
            scripts,
        })
    }

    /// Console and GUI scripts declared by the wheel, name to `module:callable`
    pub fn console_scripts(&self) -> &BTreeMap<String, String> {
        &self.scripts
    }

    /// Locate a dotted module inside the wheel
    pub fn find_module(&self, module: &str) -> Result<Option<ModuleFile>> {
        let base = module.replace('.', "/");
        let candidates = [format!("{}.py", base), format!("{}/__init__.py", base)];

        if let Some(found) = candidates.iter().find(|c| self.names.contains(c)) {
            let mut archive = open(&self.path)?;
            let source = read_entry(&mut archive, &self.path, found)?;
            return Ok(Some(ModuleFile::Source(source)));
        }

        let is_extension = self.names.iter().any(|n| {
            n.strip_prefix(base.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|rest| EXTENSION_SUFFIXES.iter().any(|s| rest.ends_with(s)))
        });

        Ok(is_extension.then_some(ModuleFile::Extension))
    }
}

fn open(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| fs::read_failed(path, e))?;
    ZipArchive::new(file).map_err(|e| fs::read_failed(path, e))
}

fn read_entry(archive: &mut ZipArchive<File>, path: &Path, name: &str) -> Result<String> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| fs::read_failed(path, format!("{}: {}", name, e)))?;
    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|e| fs::read_failed(path, format!("{}: {}", name, e)))?;
    Ok(text)
}

/// Extract `[console_scripts]` and `[gui_scripts]` from an `entry_points.txt`
fn parse_console_scripts(text: &str) -> BTreeMap<String, String> {
    let mut scripts = BTreeMap::new();
    let mut in_scripts = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_scripts = matches!(section.trim(), "console_scripts" | "gui_scripts");
            continue;
        }
        if !in_scripts {
            continue;
        }
        if let Some((name, target)) = line.split_once('=') {
            // Drop the optional `[extras]` suffix
            let target = target.split('[').next().unwrap_or(target).trim();
            scripts.insert(name.trim().to_string(), target.to_string());
        }
    }

    scripts
}
