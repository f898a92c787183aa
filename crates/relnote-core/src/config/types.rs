//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::Separators;

/// Main configuration for relnote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version control system the log is read from
    pub vcs: String,

    /// Output format name (md, json)
    pub format: String,

    /// Issue tracker link pattern, `\1` is replaced with the issue number
    pub issue_tracker_pattern: Option<String>,

    /// Keep each issue in at most one entry across the whole release
    pub unique_issues: bool,

    /// Commit groups in priority order
    pub message_groups: Vec<MessageGroup>,

    /// Output file configuration
    pub output: OutputConfig,

    /// Raw entry separators
    pub separators: Separators,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vcs: "git".to_string(),
            format: "md".to_string(),
            issue_tracker_pattern: None,
            unique_issues: false,
            message_groups: vec![
                MessageGroup::new("Features", ["feature", "feat"]),
                MessageGroup::new("Bugfixes", ["fix", "bugfix"]),
            ],
            output: OutputConfig::default(),
            separators: Separators::default(),
        }
    }
}

impl Config {
    /// Issue tracker pattern, empty when unset
    pub fn link_pattern(&self) -> &str {
        self.issue_tracker_pattern.as_deref().unwrap_or_default()
    }
}

/// A named group of commits, matched by commit-type keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageGroup {
    /// Group header (e.g. "Features")
    pub name: String,

    /// Commit-type keywords that belong to this group (e.g. "feat")
    pub keywords: Vec<String>,
}

impl MessageGroup {
    /// Create a new message group
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a keyword belongs to this group (case-insensitive)
    pub fn matches(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

/// Output file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File the release notes are written to; `README.<ext>` of the
    /// chosen format when unset
    pub file: Option<PathBuf>,

    /// Line after which new notes are inserted; prepended when absent
    pub break_marker: Option<String>,
}
