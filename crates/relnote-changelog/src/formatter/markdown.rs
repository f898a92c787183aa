//! Markdown release notes formatter

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::entry::format_scope;
use crate::issues::{consolidate_issues, inject_links};
use crate::types::{default_file_name, GroupedLog, RenderConfig};

const EXTENSION: &str = "md";

/// Markdown release notes formatter
pub struct MarkdownFormatter {
    config: RenderConfig,
    file_name: PathBuf,
    log: GroupedLog,
    decorated: Option<GroupedLog>,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new(config: RenderConfig) -> Self {
        let file_name = config
            .file_name
            .clone()
            .unwrap_or_else(|| default_file_name(EXTENSION));
        Self {
            config,
            file_name,
            log: GroupedLog::new(),
            decorated: None,
        }
    }

    /// Set the raw log
    pub fn with_log(mut self, log: GroupedLog) -> Self {
        self.set_log(log);
        self
    }

    /// Render configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Run the full decoration pipeline over a log: body issues, optional
    /// deduplication, issue links, then scope formatting
    pub fn decorate_log(&self, log: GroupedLog) -> GroupedLog {
        let config = &self.config;
        consolidate_issues(log, config)
            .map_entries(|entry| inject_links(entry, &config.link_pattern))
            .map_entries(|entry| format_scope(entry, &config.separators.scope))
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    fn name(&self) -> &'static str {
        "md"
    }

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn set_log(&mut self, log: GroupedLog) {
        self.log = log;
        self.decorated = None;
    }

    fn log(&self) -> &GroupedLog {
        self.decorated.as_ref().unwrap_or(&self.log)
    }

    #[instrument(skip(self), fields(groups = self.log.len(), entries = self.log.entry_count()))]
    fn decorate(&mut self) -> &GroupedLog {
        let decorated = self.decorate_log(self.log.clone());
        debug!(
            groups = decorated.len(),
            entries = decorated.entry_count(),
            "markdown log decorated"
        );
        self.decorated.insert(decorated)
    }

    #[instrument(skip(self), fields(release = %self.config.release))]
    fn generate(&self) -> Vec<String> {
        let log = self.log();
        if log.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![
            format!("## {}", self.config.release),
            format!("*({})*", self.config.date.format("%Y-%m-%d")),
        ];

        for section in log.sections() {
            lines.push(format!("\n#### {}", section.title));

            for entry in &section.entries {
                match entry.split_once(self.config.separators.detail.as_str()) {
                    Some((message, detail)) => {
                        lines.push(format!("* {}", message.trim()));
                        lines.push(format!("\n  {}", detail.trim()));
                    }
                    None => lines.push(format!("* {}", entry.trim())),
                }
            }
        }

        lines.push("\n---\n".to_string());

        debug!(line_count = lines.len(), "markdown release notes generated");
        lines
    }

    fn file_name(&self) -> &Path {
        &self.file_name
    }

    fn set_file_name(&mut self, file_name: PathBuf) {
        self.file_name = file_name;
    }
}
