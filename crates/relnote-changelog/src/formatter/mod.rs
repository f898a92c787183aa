//! Release notes output formats

mod json;
mod markdown;
mod registry;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;

use std::path::{Path, PathBuf};

use crate::types::GroupedLog;

/// Trait for release notes output formats.
///
/// A formatter holds the raw log handed to [`set_log`](Self::set_log).
/// [`decorate`](Self::decorate) always starts over from that raw log, so each
/// pass runs exactly once per decoration no matter how often it is called.
/// [`generate`](Self::generate) renders the decorated log when there is one,
/// the raw log otherwise.
pub trait ChangelogFormatter: Send + Sync {
    /// Canonical format name used by the registry
    fn name(&self) -> &'static str;

    /// File extension for this format
    fn extension(&self) -> &'static str;

    /// Replace the working log, discarding any previous decoration
    fn set_log(&mut self, log: GroupedLog);

    /// Current log: decorated if [`decorate`](Self::decorate) ran, raw otherwise
    fn log(&self) -> &GroupedLog;

    /// Run this format's decoration passes over the raw log
    fn decorate(&mut self) -> &GroupedLog;

    /// Render the current log into write-ready lines
    fn generate(&self) -> Vec<String>;

    /// Advisory output file, `README.<extension>` unless configured
    fn file_name(&self) -> &Path;

    /// Set the advisory output file
    fn set_file_name(&mut self, file_name: PathBuf);
}
