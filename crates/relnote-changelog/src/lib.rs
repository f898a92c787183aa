//! relnote Changelog - Release notes decoration and rendering
//!
//! This crate turns a grouped commit log into publication-ready release
//! notes: issue references are collected from commit bodies, optionally kept
//! unique across the release, linked to an issue tracker, and rendered by one
//! of the registered output formats.

pub mod entry;
pub mod extractor;
pub mod formatter;
pub mod issues;
pub mod types;
pub mod writer;

pub use extractor::LogExtractor;
pub use formatter::{ChangelogFormatter, FormatterRegistry, JsonFormatter, MarkdownFormatter};
pub use issues::{dedupe_issues, extract_issues, inject_links, merge_body_issues, SeenIssues};
pub use types::{GroupedLog, RenderConfig, Section};
pub use writer::write_release_notes;
