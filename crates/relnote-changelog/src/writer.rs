//! Writing release notes to disk

use std::path::Path;

use tracing::{debug, info, instrument};

use relnote_core::ChangelogError;

/// Write rendered lines into `path`.
///
/// A missing file is created. In an existing file the notes go right after the
/// first line equal to `break_marker` (ignoring surrounding whitespace), or at
/// the very top when there is no marker or it is not found.
#[instrument(skip(path, lines), fields(path = %path.display(), line_count = lines.len()))]
pub fn write_release_notes(
    path: &Path,
    lines: &[String],
    break_marker: Option<&str>,
) -> Result<(), ChangelogError> {
    let notes = lines.join("\n");
    let write_failed = |e: std::io::Error| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let content = if path.exists() {
        let existing = std::fs::read_to_string(path).map_err(write_failed)?;
        insert_notes(&existing, &notes, break_marker)
    } else {
        notes
    };

    std::fs::write(path, content).map_err(write_failed)?;
    info!(path = %path.display(), "release notes written");
    Ok(())
}

/// Combine existing file content with new notes
pub fn insert_notes(existing: &str, notes: &str, break_marker: Option<&str>) -> String {
    if let Some(marker) = break_marker {
        let marker = marker.trim();
        let mut offset = 0;
        for line in existing.split_inclusive('\n') {
            offset += line.len();
            if line.trim() == marker {
                let (head, tail) = existing.split_at(offset);
                let newline = if head.ends_with('\n') { "" } else { "\n" };
                return format!("{}{}{}\n{}", head, newline, notes, tail);
            }
        }
        debug!(marker, "break marker not found, prepending notes");
    }

    format!("{}\n{}", notes, existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines() -> Vec<String> {
        vec!["## 1.0.0".to_string(), "* thing".to_string()]
    }

    #[test]
    fn test_insert_prepends_without_marker() {
        assert_eq!(
            insert_notes("old notes\n", "## 1.0.0", None),
            "## 1.0.0\nold notes\n"
        );
    }

    #[test]
    fn test_insert_after_marker() {
        let existing = "# Project\n<!-- notes -->\n## 0.9.0\n";
        assert_eq!(
            insert_notes(existing, "## 1.0.0", Some("<!-- notes -->")),
            "# Project\n<!-- notes -->\n## 1.0.0\n## 0.9.0\n"
        );
    }

    #[test]
    fn test_insert_after_marker_on_last_line() {
        assert_eq!(
            insert_notes("# Project\n  MARK  ", "notes", Some("MARK")),
            "# Project\n  MARK  \nnotes\n"
        );
    }

    #[test]
    fn test_insert_missing_marker_prepends() {
        assert_eq!(
            insert_notes("# Project\n", "notes", Some("MARK")),
            "notes\n# Project\n"
        );
    }

    #[test]
    fn test_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README.md");

        write_release_notes(&path, &lines(), None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "## 1.0.0\n* thing");
    }

    #[test]
    fn test_write_into_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README.md");
        std::fs::write(&path, "# Title\n---\nolder\n").unwrap();

        write_release_notes(&path, &lines(), Some("---")).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Title\n---\n## 1.0.0\n* thing\nolder\n"
        );
    }

    #[test]
    fn test_write_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir").join("README.md");

        let err = write_release_notes(&path, &lines(), None).unwrap_err();
        assert!(matches!(err, ChangelogError::WriteFailed { .. }));
    }
}
