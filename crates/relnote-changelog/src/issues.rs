//! Issue reference passes
//!
//! Each pass is a plain function over one entry (or, for deduplication, over
//! the whole log) so it can be run and tested in isolation. The formatters
//! chain them in a fixed order: body merge, optional deduplication, links.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use relnote_core::config::ISSUE_PLACEHOLDER;

use crate::types::{GroupedLog, RenderConfig};

/// Issue reference: `#` followed by ASCII digits
static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9]+)").expect("Invalid regex"));

/// Issue references in `text`, in order of appearance, duplicates included
pub fn extract_issues(text: &str) -> Vec<&str> {
    ISSUE_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Fold the issues found in a commit body into its subject.
///
/// The entry is split at the first `body_separator`. Every body issue not
/// mentioned in the subject is appended in body order, repeats included, each
/// in its own parentheses: `subject (#1), (#2)`. The body is always dropped.
/// Entries without the separator are returned unchanged.
pub fn merge_body_issues(entry: &str, body_separator: &str) -> String {
    let Some((subject, body)) = entry.split_once(body_separator) else {
        return entry.to_string();
    };

    let in_subject = extract_issues(subject);
    let new_issues: Vec<&str> = extract_issues(body)
        .into_iter()
        .filter(|issue| !in_subject.contains(issue))
        .collect();

    if new_issues.is_empty() {
        subject.to_string()
    } else {
        format!("{} ({})", subject, new_issues.join("), ("))
    }
}

/// Issues claimed during one deduplication run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenIssues {
    issues: HashSet<String>,
}

impl SeenIssues {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim every issue of an entry.
    ///
    /// Returns `false`, claiming nothing, when any issue of the entry was
    /// already claimed. Otherwise records all of them and returns `true`.
    pub fn claim(&mut self, entry: &str) -> bool {
        let issues = extract_issues(entry);
        if issues.iter().any(|issue| self.issues.contains(*issue)) {
            return false;
        }
        self.issues.extend(issues.into_iter().map(String::from));
        true
    }

    /// Check whether an issue (e.g. `#12`) was claimed
    pub fn contains(&self, issue: &str) -> bool {
        self.issues.contains(issue)
    }

    /// Number of claimed issues
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when nothing was claimed
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Keep each issue in at most one entry across the whole log.
///
/// Groups are walked in order, entries in order. The first entry mentioning
/// an issue claims it; any later entry mentioning an already claimed issue is
/// removed as a whole, even if it also carries new issues. Groups left without
/// entries are removed. Returns the surviving log and the claimed issues.
pub fn dedupe_issues(log: GroupedLog) -> (GroupedLog, SeenIssues) {
    let mut seen = SeenIssues::new();
    let before = log.entry_count();

    let log: GroupedLog = log
        .into_iter()
        .filter_map(|mut section| {
            section.entries.retain(|entry| seen.claim(entry));
            (!section.is_empty()).then_some(section)
        })
        .collect();

    debug!(
        removed = before - log.entry_count(),
        issues = seen.len(),
        "deduplicated issues"
    );
    (log, seen)
}

/// Issue tracker URL for an issue number
pub fn issue_url(pattern: &str, id: &str) -> String {
    pattern.replace(ISSUE_PLACEHOLDER, id)
}

/// Replace every `#N` with `[#N](url)`, the URL built from `pattern`.
///
/// Must run once per entry: on already linked text the reference inside the
/// link label is matched again.
pub fn inject_links(entry: &str, pattern: &str) -> String {
    ISSUE_REGEX
        .replace_all(entry, |caps: &Captures<'_>| {
            let id = &caps[1];
            format!("[#{}]({})", id, issue_url(pattern, id))
        })
        .into_owned()
}

/// Body merge followed, when enabled, by cross-group deduplication
pub fn consolidate_issues(log: GroupedLog, config: &RenderConfig) -> GroupedLog {
    let log = log.map_entries(|entry| merge_body_issues(entry, &config.separators.body));

    if config.unique_issues {
        dedupe_issues(log).0
    } else {
        log
    }
}
