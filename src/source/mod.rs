//! Dependency declarations
//!
//! A dependency is either a requirement resolved against the package index
//! or a path on the local filesystem:
//! - Requirements: `requests`, `requests>=2.31`, `rich[jupyter]==13.7.0`
//! - Paths: `../libfoo`, `./vendor/libbar-1.0-py3-none-any.whl`, `/abs/lib`
//! - Tables: `{ path = "../libfoo", version = "1.2.0" }`,
//!   `{ name = "requests", version = ">=2.31" }`

pub mod dependency;

pub use dependency::Dependency;
