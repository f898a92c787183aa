//! Shared types

use serde::{Deserialize, Serialize};

/// Default marker between an entry's scope and its subject
pub const SCOPE_SEPARATOR: &str = "{{SCOPE}}";

/// Default marker between an entry's subject and its commit body
pub const BODY_SEPARATOR: &str = "{{BODY}}";

/// Default marker between an entry's message and its rendered detail line
pub const DETAIL_SEPARATOR: &str = "{{DETAIL}}";

/// Literal markers used to encode structure inside a raw log entry.
///
/// A raw entry looks like `scope{{SCOPE}}subject{{DETAIL}}detail{{BODY}}body`,
/// every part but the subject being optional. Markers are opaque strings and
/// are always located by their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separators {
    /// Splits `scope` from `subject`
    pub scope: String,
    /// Splits `subject` from the multi-line commit body
    pub body: String,
    /// Splits the displayed message from its detail line
    pub detail: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            scope: SCOPE_SEPARATOR.to_string(),
            body: BODY_SEPARATOR.to_string(),
            detail: DETAIL_SEPARATOR.to_string(),
        }
    }
}

impl Separators {
    /// Join a scope and a subject into a raw entry
    pub fn with_scope(&self, scope: &str, subject: &str) -> String {
        format!("{}{}{}", scope, self.scope, subject)
    }

    /// Append a commit body to a raw entry
    pub fn with_body(&self, entry: &str, body: &str) -> String {
        format!("{}{}{}", entry, self.body, body)
    }
}
