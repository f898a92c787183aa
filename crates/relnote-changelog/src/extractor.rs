//! Grouping of commits into a raw release log

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use relnote_core::config::{Config, MessageGroup};
use relnote_core::Separators;
use relnote_git::CommitInfo;

use crate::types::{GroupedLog, Section};

/// Commit summary: `keyword(scope)!: subject`, scope and `!` optional
static COMMIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<keyword>[A-Za-z]+)(?:\((?P<scope>[^)]*)\))?!?:\s*(?P<subject>\S.*)$")
        .expect("Invalid regex")
});

/// Builds a [`GroupedLog`] from commits using the configured message groups
pub struct LogExtractor {
    groups: Vec<MessageGroup>,
    separators: Separators,
}

impl LogExtractor {
    /// Create an extractor for the given groups (in priority order)
    pub fn new(groups: Vec<MessageGroup>, separators: Separators) -> Self {
        Self { groups, separators }
    }

    /// Create an extractor from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.message_groups.clone(), config.separators.clone())
    }

    /// Raw entry for a commit, with the index of the group it belongs to.
    ///
    /// Returns `None` when the summary has no keyword prefix or the keyword
    /// belongs to no group.
    pub fn extract_entry(&self, commit: &CommitInfo) -> Option<(usize, String)> {
        let caps = COMMIT_REGEX.captures(commit.message.trim())?;
        let keyword = caps.name("keyword")?.as_str();
        let group = self.groups.iter().position(|g| g.matches(keyword))?;

        let subject = caps.name("subject")?.as_str().trim_end();
        let mut entry = match caps.name("scope").map(|m| m.as_str().trim()) {
            Some(scope) if !scope.is_empty() => self.separators.with_scope(scope, subject),
            _ => subject.to_string(),
        };

        if let Some(body) = commit.body.as_deref().filter(|b| !b.trim().is_empty()) {
            entry = self.separators.with_body(&entry, body);
        }

        Some((group, entry))
    }

    /// Group commits by keyword. Groups keep their configured order and are
    /// only present when at least one commit matched; entries keep commit order.
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn extract(&self, commits: &[CommitInfo]) -> GroupedLog {
        let mut sections: Vec<Section> = self
            .groups
            .iter()
            .map(|g| Section::new(g.name.clone()))
            .collect();

        for commit in commits {
            match self.extract_entry(commit) {
                Some((group, entry)) => sections[group].add_entry(entry),
                None => trace!(hash = %commit.short_hash, "commit matches no group"),
            }
        }

        let log: GroupedLog = sections.into_iter().filter(|s| !s.is_empty()).collect();
        debug!(
            groups = log.len(),
            entries = log.entry_count(),
            "extracted grouped log"
        );
        log
    }
}
