use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Utc};

use crate::types::{GitMetrics, LastCommit};

/// Collect per-file git history metrics.
///
/// Best-effort: a missing git binary, a directory that is not a repository,
/// or an untracked file all degrade to the zero/untracked record.
pub fn collect(project_root: &Path, rel_path: &str) -> GitMetrics {
    let last_commit = last_commit(project_root, rel_path);
    if last_commit.is_none() {
        return GitMetrics::default();
    }
    GitMetrics {
        commit_count: commit_count(project_root, rel_path).unwrap_or(0),
        is_git_tracked: true,
        last_commit,
    }
}

/// Number of history entries touching the file, if queryable.
fn commit_count(project_root: &Path, rel_path: &str) -> Option<usize> {
    let output = Command::new("git")
        .args(["rev-list", "--count", "HEAD", "--", rel_path])
        .current_dir(project_root)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout).trim().parse().ok()
}

/// Most recent commit touching the file, if any.
fn last_commit(project_root: &Path, rel_path: &str) -> Option<LastCommit> {
    // Unit-separator delimited to survive arbitrary commit messages
    let output = Command::new("git")
        .args([
            "log",
            "-1",
            "--format=%h%x1f%an%x1f%ae%x1f%aI%x1f%s",
            "--",
            rel_path,
        ])
        .current_dir(project_root)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let line = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.split('\u{1f}');
    let hash = parts.next()?.to_string();
    let author = parts.next()?.to_string();
    let email = parts.next()?.to_string();
    let date = parts.next()?.to_string();
    let message = parts.next().unwrap_or_default().to_string();

    Some(LastCommit {
        days_ago: days_since(&date),
        hash,
        author,
        email,
        date,
        message,
    })
}

/// Whole days elapsed since an ISO-8601 timestamp; 0 if it cannot be parsed.
fn days_since(iso_date: &str) -> i64 {
    DateTime::parse_from_rfc3339(iso_date)
        .map(|dt| (Utc::now() - dt.with_timezone(&Utc)).num_days().max(0))
        .unwrap_or(0)
}
