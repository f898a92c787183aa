//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get the commits reachable from `to` (HEAD when `None`) but not from
    /// `from`, newest first, as `git log from..to` lists them.
    #[instrument(skip(self))]
    pub fn commits_between(&self, from: &str, to: Option<&str>) -> Result<Vec<CommitInfo>> {
        let from_oid = self.resolve(from)?;
        let to_oid = self.resolve(to.unwrap_or("HEAD"))?;

        let commits = self.walk(to_oid, from_oid)?;
        debug!(count = commits.len(), "collected commits for range");
        Ok(commits)
    }

    fn walk(&self, start: Oid, hide: Oid) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(start)?;
        revwalk.hide(hide)?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let message = commit.summary().unwrap_or("(no message)").to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    let info = CommitInfo::new(
        hash,
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    );

    match commit.body() {
        Some(body) if !body.trim().is_empty() => info.with_body(body.trim_end()),
        _ => info,
    }
}
