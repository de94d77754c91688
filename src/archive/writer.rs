//! Staged zip writing with atomic promotion
//!
//! Entries go into a temp file next to the destination. `commit` renames it
//! over the destination; dropping a `StagedArchive` without committing
//! removes the temp file and leaves any existing archive alone.
//!
//! Every entry gets the same timestamp (1980-01-01), fixed permissions and
//! Deflate compression, so the bytes depend only on entry names, order and
//! contents.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Result, fs};

pub struct StagedArchive {
    target: PathBuf,
    zip: ZipWriter<NamedTempFile>,
    entries: usize,
}

impl StagedArchive {
    /// Start a temp archive in the target's directory
    pub fn create(target: &Path) -> Result<Self> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|e| fs::write_failed(&parent, e))?;

        let temp = tempfile::Builder::new()
            .prefix(".pychub-")
            .suffix(".tmp")
            .tempfile_in(&parent)
            .map_err(|e| fs::write_failed(target, e))?;

        tracing::debug!(temp = %temp.path().display(), "Staging archive");

        Ok(Self {
            target: target.to_path_buf(),
            zip: ZipWriter::new(temp),
            entries: 0,
        })
    }

    fn options(mode: u32) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(mode)
    }

    /// Copy a file from disk into the archive
    pub fn add_file(&mut self, name: &str, source: &Path, mode: u32) -> Result<()> {
        let mut file = File::open(source).map_err(|e| fs::read_failed(source, e))?;
        self.zip
            .start_file(name, Self::options(mode))
            .map_err(|e| fs::write_failed(&self.target, format!("{}: {}", name, e)))?;
        io::copy(&mut file, &mut self.zip)
            .map_err(|e| fs::write_failed(&self.target, format!("{}: {}", name, e)))?;
        self.entries += 1;
        tracing::debug!(entry = name, "Added archive entry");
        Ok(())
    }

    /// Write in-memory bytes as an entry
    pub fn add_bytes(&mut self, name: &str, bytes: &[u8], mode: u32) -> Result<()> {
        self.zip
            .start_file(name, Self::options(mode))
            .map_err(|e| fs::write_failed(&self.target, format!("{}: {}", name, e)))?;
        self.zip
            .write_all(bytes)
            .map_err(|e| fs::write_failed(&self.target, format!("{}: {}", name, e)))?;
        self.entries += 1;
        tracing::debug!(entry = name, "Added archive entry");
        Ok(())
    }

    /// Finish the zip and move it onto the destination
    pub fn commit(self) -> Result<PathBuf> {
        let temp = self
            .zip
            .finish()
            .map_err(|e| fs::write_failed(&self.target, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| fs::write_failed(&self.target, e))?;
        temp.persist(&self.target)
            .map_err(|e| fs::write_failed(&self.target, e.error))?;

        tracing::debug!(path = %self.target.display(), entries = self.entries, "Committed archive");
        Ok(self.target)
    }
}
