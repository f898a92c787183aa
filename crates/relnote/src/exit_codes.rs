//! Exit codes for the CLI

use relnote_core::{ChangelogError, ConfigError, GitError, RelnoteError};

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Release notes generation or write error
pub const CHANGELOG_ERROR: i32 = 4;

/// Pick the exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<ChangelogError>() {
            return CHANGELOG_ERROR;
        }
        if let Some(err) = cause.downcast_ref::<RelnoteError>() {
            return match err {
                RelnoteError::Config(_) => CONFIG_ERROR,
                RelnoteError::Git(_) => GIT_ERROR,
                RelnoteError::Changelog(_) => CHANGELOG_ERROR,
            };
        }
    }
    ERROR
}
