//! Default configuration values

use super::types::Config;
use crate::error::{ConfigError, Result};

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnote.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnote.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".relnote.yaml";

/// Supported version control systems
pub const SUPPORTED_VCS: &[&str] = &["git"];

/// Supported output format names
pub const SUPPORTED_FORMATS: &[&str] = &["md", "markdown", "json"];

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".relnote.toml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> Result<String> {
    let config = Config::default();
    Ok(toml::to_string_pretty(&config).map_err(ConfigError::TomlSerialize)?)
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnote configuration

vcs: git
format: md
# issue_tracker_pattern: "https://github.com/owner/repo/issues/\1"
unique_issues: false

message_groups:
  - name: Features
    keywords: [feature, feat]
  - name: Bugfixes
    keywords: [fix, bugfix]

# output:
#   file: README.md
#   break_marker: "<!-- release notes -->"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.vcs, "git");
        assert_eq!(config.message_groups[1].name, "Bugfixes");
        assert!(config.issue_tracker_pattern.is_none());
        assert!(config.output.file.is_none());
    }

    #[test]
    fn test_default_toml_parses() {
        let toml_str = default_config_toml().unwrap();
        let config: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.format, "md");
    }
}
