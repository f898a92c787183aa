//! relnote Git - Commit history for release notes
//!
//! This crate opens git repositories and reads the commits that make up a
//! release range.

mod commits;
mod repository;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::CommitInfo;
