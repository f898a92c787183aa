//! JSON release notes formatter

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::ChangelogFormatter;
use crate::entry::EntryParts;
use crate::issues::{consolidate_issues, extract_issues, issue_url};
use crate::types::{default_file_name, GroupedLog, RenderConfig};

const EXTENSION: &str = "json";

/// JSON release notes formatter.
///
/// Decoration only merges body issues and applies unique issues; links and
/// scopes are emitted as structured fields instead of markdown.
pub struct JsonFormatter {
    config: RenderConfig,
    file_name: PathBuf,
    log: GroupedLog,
    decorated: Option<GroupedLog>,
}

#[derive(Debug, Serialize)]
struct ReleaseDocument<'a> {
    release: &'a str,
    date: String,
    groups: Vec<GroupDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct GroupDocument<'a> {
    title: &'a str,
    entries: Vec<EntryDocument<'a>>,
}

#[derive(Debug, Serialize)]
struct EntryDocument<'a> {
    #[serde(flatten)]
    parts: EntryParts<'a>,
    issues: Vec<IssueLink<'a>>,
}

/// Issue number exactly as written
#[derive(Debug, Serialize)]
struct IssueLink<'a> {
    id: &'a str,
    url: String,
}

impl JsonFormatter {
    /// Create a new JSON formatter
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

    fn entry_document<'a>(&self, entry: &'a str) -> EntryDocument<'a> {
        let parts = EntryParts::parse(entry, &self.config.separators);

        let mut issues: Vec<IssueLink<'a>> = Vec::new();
        for issue in extract_issues(entry) {
            let id = &issue[1..];
            if issues.iter().all(|known| known.id != id) {
                issues.push(IssueLink {
                    id,
                    url: issue_url(&self.config.link_pattern, id),
                });
            }
        }

        EntryDocument { parts, issues }
    }
}

impl ChangelogFormatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
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

    fn decorate(&mut self) -> &GroupedLog {
        let decorated = consolidate_issues(self.log.clone(), &self.config);
        debug!(
            groups = decorated.len(),
            entries = decorated.entry_count(),
            "json log decorated"
        );
        self.decorated.insert(decorated)
    }

    #[instrument(skip(self), fields(release = %self.config.release))]
    fn generate(&self) -> Vec<String> {
        let log = self.log();
        if log.is_empty() {
            return Vec::new();
        }

        let document = ReleaseDocument {
            release: &self.config.release,
            date: self.config.date.format("%Y-%m-%d").to_string(),
            groups: log
                .sections()
                .iter()
                .map(|section| GroupDocument {
                    title: &section.title,
                    entries: section
                        .entries
                        .iter()
                        .map(|entry| self.entry_document(entry))
                        .collect(),
                })
                .collect(),
        };

        match serde_json::to_string_pretty(&document) {
            Ok(json) => vec![json],
            Err(e) => {
                warn!(error = %e, "failed to serialize release notes");
                Vec::new()
            }
        }
    }

    fn file_name(&self) -> &Path {
        &self.file_name
    }

    fn set_file_name(&mut self, file_name: PathBuf) {
        self.file_name = file_name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> RenderConfig {
        let date = NaiveDate::from_ymd_opt(2014, 12, 21).unwrap();
        RenderConfig::new("4.5.6", date)
            .with_link_pattern("http://tracker/show/\\1")
            .with_file_name("release.json")
    }

    #[test]
    fn test_generate_structured_document() {
        let log = GroupedLog::from_groups([
            (
                "Features",
                vec!["ui{{SCOPE}}new button #12{{BODY}}Refs #13 and #12"],
            ),
            ("Bugfixes", vec!["fix crash{{DETAIL}}only on startup"]),
        ]);
        let mut formatter = JsonFormatter::new(config()).with_log(log);
        formatter.decorate();

        let lines = formatter.generate();
        assert_eq!(lines.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["release"], "4.5.6");
        assert_eq!(value["date"], "2014-12-21");

        let feature = &value["groups"][0]["entries"][0];
        assert_eq!(value["groups"][0]["title"], "Features");
        assert_eq!(feature["scope"], "ui");
        assert_eq!(feature["subject"], "new button #12 (#13)");
        assert_eq!(feature["issues"][0]["id"], "12");
        assert_eq!(feature["issues"][1]["url"], "http://tracker/show/13");

        let bugfix = &value["groups"][1]["entries"][0];
        assert!(bugfix["scope"].is_null());
        assert_eq!(bugfix["detail"], "only on startup");
        assert_eq!(bugfix["issues"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_oversized_issue_number_is_kept() {
        let log = GroupedLog::from_groups([(
            "Bugfixes",
            vec!["fix #123456789012345678901234567890"],
        )]);
        let mut formatter = JsonFormatter::new(config()).with_log(log);
        formatter.decorate();

        let value: serde_json::Value = serde_json::from_str(&formatter.generate()[0]).unwrap();
        let issue = &value["groups"][0]["entries"][0]["issues"][0];
        assert_eq!(issue["id"], "123456789012345678901234567890");
        assert_eq!(
            issue["url"],
            "http://tracker/show/123456789012345678901234567890"
        );
    }

    #[test]
    fn test_unique_issues_applies() {
        let log = GroupedLog::from_groups([
            ("Features", vec!["feature #123"]),
            ("Bugfixes", vec!["bugfix #123"]),
        ]);
        let mut formatter =
            JsonFormatter::new(config().with_unique_issues(true)).with_log(log);

        assert!(!formatter.decorate().contains_group("Bugfixes"));
    }

    #[test]
    fn test_generate_empty_log() {
        let formatter = JsonFormatter::new(config());
        assert!(formatter.generate().is_empty());
    }

    #[test]
    fn test_names() {
        let formatter = JsonFormatter::new(config());
        assert_eq!(formatter.name(), "json");
        assert_eq!(formatter.extension(), "json");
        assert_eq!(formatter.file_name(), Path::new("release.json"));
    }

    #[test]
    fn test_default_file_uses_json_extension() {
        let date = NaiveDate::from_ymd_opt(2014, 12, 21).unwrap();
        let formatter = JsonFormatter::new(RenderConfig::new("4.5.6", date));
        assert_eq!(formatter.file_name(), Path::new("README.json"));
    }
}
