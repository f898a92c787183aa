//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::defaults::{SUPPORTED_FORMATS, SUPPORTED_VCS};
use super::types::Config;

/// Placeholder the issue tracker pattern must contain
pub const ISSUE_PLACEHOLDER: &str = "\\1";

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_sources(config)?;
    validate_groups(config)?;
    validate_pattern(config)?;
    validate_separators(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn is_supported(supported: &[&str], name: &str) -> bool {
    supported.iter().any(|s| s.eq_ignore_ascii_case(name))
}

fn validate_sources(config: &Config) -> Result<()> {
    if !is_supported(SUPPORTED_VCS, &config.vcs) {
        return Err(invalid("vcs", format!("must be one of: {}", SUPPORTED_VCS.join(", "))).into());
    }

    if !is_supported(SUPPORTED_FORMATS, &config.format) {
        return Err(invalid(
            "format",
            format!("must be one of: {}", SUPPORTED_FORMATS.join(", ")),
        )
        .into());
    }

    Ok(())
}

fn validate_groups(config: &Config) -> Result<()> {
    if config.message_groups.is_empty() {
        return Err(invalid("message_groups", "at least one group is required").into());
    }

    let mut names = HashSet::new();
    for (i, group) in config.message_groups.iter().enumerate() {
        if group.name.trim().is_empty() {
            return Err(invalid(
                format!("message_groups[{}].name", i),
                "group name cannot be empty",
            )
            .into());
        }

        if !names.insert(group.name.as_str()) {
            return Err(invalid(
                format!("message_groups[{}].name", i),
                format!("duplicate group '{}'", group.name),
            )
            .into());
        }

        if group.keywords.is_empty() || group.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(invalid(
                format!("message_groups[{}].keywords", i),
                "keywords must be a non-empty list of non-empty strings",
            )
            .into());
        }
    }

    Ok(())
}

fn validate_pattern(config: &Config) -> Result<()> {
    if let Some(pattern) = &config.issue_tracker_pattern {
        if !pattern.contains(ISSUE_PLACEHOLDER) {
            return Err(invalid(
                "issue_tracker_pattern",
                format!("must contain {} placeholder", ISSUE_PLACEHOLDER),
            )
            .into());
        }
    }

    Ok(())
}

fn validate_separators(config: &Config) -> Result<()> {
    let seps = &config.separators;
    let all = [
        ("separators.scope", &seps.scope),
        ("separators.body", &seps.body),
        ("separators.detail", &seps.detail),
    ];

    for (field, value) in all {
        if value.is_empty() {
            return Err(invalid(field, "separator cannot be empty").into());
        }
    }

    if seps.scope == seps.body || seps.scope == seps.detail || seps.body == seps.detail {
        return Err(invalid("separators", "separators must be distinct").into());
    }

    Ok(())
}
