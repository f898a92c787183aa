//! Release notes types

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use relnote_core::config::Config;
use relnote_core::Separators;

/// Stem of the output file when none is configured
pub const DEFAULT_FILE_STEM: &str = "README";

/// Default output file for a format: `README.<extension>`
pub fn default_file_name(extension: &str) -> PathBuf {
    PathBuf::from(DEFAULT_FILE_STEM).with_extension(extension)
}

/// A named group of log entries (e.g. "Features")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Group header
    pub title: String,
    /// Raw or decorated entries, in commit order
    pub entries: Vec<String>,
}

impl Section {
    /// Create a new empty section
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Add an entry to the section
    pub fn add_entry(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered mapping from group name to its entries.
///
/// Group order is priority order: it decides which group keeps an issue when
/// unique issues are enforced, and the order groups are rendered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedLog {
    sections: Vec<Section>,
}

impl GroupedLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from `(group, entries)` pairs, keeping their order
    pub fn from_groups<I, T, E, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (T, E)>,
        T: Into<String>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut log = Self::new();
        for (title, entries) in groups {
            let section = log.section_mut(title.into());
            section.entries.extend(entries.into_iter().map(Into::into));
        }
        log
    }

    /// Append an entry to a group, creating the group at the end if needed
    pub fn push_entry(&mut self, group: impl Into<String>, entry: impl Into<String>) {
        self.section_mut(group.into()).add_entry(entry);
    }

    fn section_mut(&mut self, title: String) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.title == title) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(title));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Entries of a group, if the group exists
    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.title == group)
            .map(|s| s.entries.as_slice())
    }

    /// Check whether a group exists
    pub fn contains_group(&self, group: &str) -> bool {
        self.get(group).is_some()
    }

    /// All sections in order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Group names in order
    pub fn group_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the log has no groups at all
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of entries across all groups
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    /// Apply a transformation to every entry, keeping order
    pub fn map_entries<F>(self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        self.sections
            .into_iter()
            .map(|section| Section {
                entries: section.entries.iter().map(|e| f(e.as_str())).collect(),
                title: section.title,
            })
            .collect()
    }
}

impl FromIterator<Section> for GroupedLog {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for GroupedLog {
    type Item = Section;
    type IntoIter = std::vec::IntoIter<Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

/// Settings for one decoration and rendering run
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Release label shown in the header (e.g. "4.5.6")
    pub release: String,
    /// Release date shown under the header
    pub date: NaiveDate,
    /// Advisory output file; the format's default when `None`
    pub file_name: Option<PathBuf>,
    /// Issue tracker link pattern, `\1` receives the issue number
    pub link_pattern: String,
    /// Keep each issue in at most one entry
    pub unique_issues: bool,
    /// Raw entry separators
    pub separators: Separators,
}

impl RenderConfig {
    /// Create a render config with default file name, no link pattern and
    /// unique issues disabled
    pub fn new(release: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            release: release.into(),
            date,
            file_name: None,
            link_pattern: String::new(),
            unique_issues: false,
            separators: Separators::default(),
        }
    }

    /// Create a render config from the loaded configuration
    pub fn from_config(config: &Config, release: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            file_name: config.output.file.clone(),
            link_pattern: config.link_pattern().to_string(),
            unique_issues: config.unique_issues,
            separators: config.separators.clone(),
            ..Self::new(release, date)
        }
    }

    /// Set the issue tracker link pattern
    pub fn with_link_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.link_pattern = pattern.into();
        self
    }

    /// Enable or disable unique issues
    pub fn with_unique_issues(mut self, unique: bool) -> Self {
        self.unique_issues = unique;
        self
    }

    /// Set the output file name
    pub fn with_file_name(mut self, file_name: impl Into<PathBuf>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Use custom separators
    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_groups_keeps_order() {
        let log = GroupedLog::from_groups([
            ("Features", vec!["a", "b"]),
            ("Bugfixes", vec!["c"]),
        ]);
        assert_eq!(log.group_names(), vec!["Features", "Bugfixes"]);
        assert_eq!(log.get("Features").unwrap(), ["a", "b"]);
        assert_eq!(log.entry_count(), 3);
    }

    #[test]
    fn test_push_entry_appends_to_existing_group() {
        let mut log = GroupedLog::new();
        log.push_entry("Bugfixes", "one");
        log.push_entry("Features", "two");
        log.push_entry("Bugfixes", "three");

        assert_eq!(log.group_names(), vec!["Bugfixes", "Features"]);
        assert_eq!(log.get("Bugfixes").unwrap(), ["one", "three"]);
    }

    #[test]
    fn test_map_entries() {
        let log = GroupedLog::from_groups([("Features", vec!["a", "b"])]);
        let log = log.map_entries(|e| e.to_uppercase());
        assert_eq!(log.get("Features").unwrap(), ["A", "B"]);
    }

    #[test]
    fn test_missing_group() {
        let log = GroupedLog::new();
        assert!(log.is_empty());
        assert!(!log.contains_group("Features"));
    }

    #[test]
    fn test_render_config_from_config() {
        let mut config = Config::default();
        config.unique_issues = true;
        config.issue_tracker_pattern = Some("http://t/\\1".to_string());

        let date = NaiveDate::from_ymd_opt(2014, 12, 21).unwrap();
        let render = RenderConfig::from_config(&config, "1.0.0", date);

        assert!(render.unique_issues);
        assert_eq!(render.link_pattern, "http://t/\\1");
        assert!(render.file_name.is_none());
        assert_eq!(render.release, "1.0.0");
    }

    #[test]
    fn test_default_file_name_follows_extension() {
        assert_eq!(default_file_name("md"), PathBuf::from("README.md"));
        assert_eq!(default_file_name("json"), PathBuf::from("README.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_render_config_keeps_non_utf8_file() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let file = PathBuf::from(OsStr::from_bytes(b"notes-\xff.md"));
        let mut config = Config::default();
        config.output.file = Some(file.clone());

        let date = NaiveDate::from_ymd_opt(2014, 12, 21).unwrap();
        let render = RenderConfig::from_config(&config, "1.0.0", date);
        assert_eq!(render.file_name, Some(file));
    }
}
