//! Project configuration for pychub
//!
//! This module handles:
//! - `discovery.rs`: finding `pyproject.toml` / `chubproject*.toml`
//! - `parser.rs`: reading a file under the table-location rules
//! - `merge.rs`: applying command-line overrides
//! - `save.rs`: writing a config back to a chosen table
//! - `table.rs`: table locations and file kinds
//! - `project/`: the `ProjectConfig` model and its TOML mapping

pub mod discovery;
pub mod merge;
pub mod parser;
pub mod project;
pub mod save;
pub mod table;

// Re-export commonly used types
pub use discovery::discover;
pub use merge::{CliOverrides, merge};
pub use parser::parse;
pub use project::{IncludeSpec, MetadataEntry, ProjectConfig};
pub use save::save;
pub use table::{FileKind, TableLocation};
