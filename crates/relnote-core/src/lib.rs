//! relnote Core - Shared foundations for release notes generation
//!
//! This crate provides the error types, configuration system and the entry
//! separators shared by the git, changelog and CLI crates.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ChangelogError, ConfigError, GitError, RelnoteError, Result};
pub use types::Separators;
