//! Entry shape: scope, subject and detail

use serde::Serialize;

use relnote_core::Separators;

/// Uppercase the first character when it is an ASCII lowercase letter.
///
/// Any other leading character (digit, punctuation, `[` of a link, non-ASCII
/// letter) is left as is.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut out = String::with_capacity(text.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => text.to_string(),
    }
}

/// Render the optional scope prefix of an entry.
///
/// `scope{sep}subject` becomes `**Scope**: Subject`; an entry without the
/// separator is only capitalized.
pub fn format_scope(entry: &str, scope_separator: &str) -> String {
    match entry.split_once(scope_separator) {
        Some((scope, subject)) => format!(
            "**{}**: {}",
            capitalize_first(scope),
            capitalize_first(subject)
        ),
        None => capitalize_first(entry),
    }
}

/// A raw entry split into its displayable parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryParts<'a> {
    /// Optional scope
    pub scope: Option<&'a str>,
    /// Subject line
    pub subject: &'a str,
    /// Optional detail line
    pub detail: Option<&'a str>,
}

impl<'a> EntryParts<'a> {
    /// Split an entry whose commit body was already merged away
    pub fn parse(entry: &'a str, separators: &Separators) -> Self {
        let (message, detail) = match entry.split_once(separators.detail.as_str()) {
            Some((message, detail)) => (message, Some(detail.trim())),
            None => (entry, None),
        };

        let (scope, subject) = match message.split_once(separators.scope.as_str()) {
            Some((scope, subject)) => (Some(scope.trim()), subject.trim()),
            None => (None, message.trim()),
        };

        Self {
            scope,
            subject,
            detail,
        }
    }
}
