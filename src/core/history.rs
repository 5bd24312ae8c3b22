//! core::history
//!
//! Loading commit histories from JSON.
//!
//! This is the data-source boundary: everything past [`History`] works on
//! validated [`Commit`] records.
//!
//! # Formats
//!
//! A history file is one of:
//!
//! ```json
//! { "branches": ["main", "feature"], "commits": [ { "commit_hash": "a", ... } ] }
//! ```
//!
//! ```json
//! { "logs": [ { "branch": "main", "commits": [ ... ] }, { "branch": "feature", "commits": [ ... ] } ] }
//! ```
//!
//! ```json
//! [ { "commit_hash": "a", ... } ]
//! ```
//!
//! Per-branch logs overlap (a feature branch's log repeats the commits it
//! shares with main), so they are merged keeping the first copy of each
//! hash. Snapshot and bare-array files are taken as-is; duplicates there are
//! left for the commit index and reported by `lanes check`.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::lanes::VisibleBranches;
use super::types::{BranchName, Commit};

/// Errors from history loading.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse history file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid history: {0}")]
    Invalid(String),
}

/// One branch's commit log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchLog {
    pub branch: BranchName,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    #[serde(default)]
    branches: Vec<BranchName>,
    commits: Vec<Commit>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LogsFile {
    logs: Vec<BranchLog>,
}

/// A full commit history plus its declared branch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    branches: Vec<BranchName>,
    commits: Vec<Commit>,
}

impl History {
    /// Build a history with an explicit branch order.
    pub fn new(branches: Vec<BranchName>, commits: Vec<Commit>) -> Self {
        Self { branches, commits }
    }

    /// Build a history whose branch order is first appearance in `commits`.
    pub fn from_commits(commits: Vec<Commit>) -> Self {
        Self {
            branches: Vec::new(),
            commits,
        }
    }

    /// Merge per-branch logs, keeping the first copy of each hash.
    ///
    /// Branch order follows the logs.
    pub fn from_branch_logs(logs: Vec<BranchLog>) -> Self {
        let mut seen = HashSet::new();
        let mut branches = Vec::with_capacity(logs.len());
        let mut commits = Vec::new();

        for log in logs {
            if !branches.contains(&log.branch) {
                branches.push(log.branch);
            }
            for commit in log.commits {
                if seen.insert(commit.hash.clone()) {
                    commits.push(commit);
                }
            }
        }

        Self { branches, commits }
    }

    /// Parse a history from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Invalid` if the text is not one of the
    /// accepted shapes or a record fails validation.
    pub fn parse(text: &str) -> Result<Self, HistoryError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| HistoryError::Invalid(e.to_string()))?;

        let invalid = |e: serde_json::Error| HistoryError::Invalid(e.to_string());
        if value.is_array() {
            let commits: Vec<Commit> = serde_json::from_value(value).map_err(invalid)?;
            Ok(Self::from_commits(commits))
        } else if value.get("logs").is_some() {
            let file: LogsFile = serde_json::from_value(value).map_err(invalid)?;
            Ok(Self::from_branch_logs(file.logs))
        } else if value.is_object() {
            let file: SnapshotFile = serde_json::from_value(value).map_err(invalid)?;
            Ok(Self::new(file.branches, file.commits))
        } else {
            Err(HistoryError::Invalid(
                "expected a commit array or an object with 'commits' or 'logs'".to_string(),
            ))
        }
    }

    /// Read and parse a history file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let text = fs::read_to_string(path).map_err(|source| HistoryError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|e| HistoryError::ParseError {
            path: path.to_path_buf(),
            message: match e {
                HistoryError::Invalid(message) => message,
                other => other.to_string(),
            },
        })
    }

    /// All commits, in file order.
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// Branches declared by the file.
    pub fn declared_branches(&self) -> &[BranchName] {
        &self.branches
    }

    /// Every branch: declared ones first, then any others in order of
    /// first appearance among the commits.
    pub fn branches(&self) -> Vec<&BranchName> {
        let mut all: Vec<&BranchName> = Vec::new();
        let declared = self.branches.iter();
        let used = self.commits.iter().map(|c| &c.branch);
        for branch in declared.chain(used) {
            if !all.contains(&branch) {
                all.push(branch);
            }
        }
        all
    }

    /// Branches used by commits but not declared.
    ///
    /// Always empty when the file declares no branches.
    pub fn undeclared_branches(&self) -> Vec<&BranchName> {
        if self.branches.is_empty() {
            return Vec::new();
        }
        self.branches()
            .into_iter()
            .filter(|b| !self.branches.contains(*b))
            .collect()
    }

    /// The selection shown when the user asks for nothing specific.
    ///
    /// Declared branches if there are any, otherwise every branch in order
    /// of first appearance.
    pub fn default_visible(&self) -> VisibleBranches {
        if self.branches.is_empty() {
            self.branches().into_iter().cloned().collect()
        } else {
            self.branches.iter().cloned().collect()
        }
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{branch, commit};

    const SNAPSHOT: &str = r#"{
        "branches": ["main", "feature"],
        "commits": [
            {"commit_hash": "a", "message": "prep", "branch": "main", "parent_commits": []},
            {"commit_hash": "b", "message": "bun", "branch": "feature", "parent_commits": ["a"]},
            {"commit_hash": "c", "message": "patty", "branch": "main", "parent_commits": ["a"]}
        ]
    }"#;

    #[test]
    fn parses_snapshot() {
        let history = History::parse(SNAPSHOT).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.declared_branches(),
            &[branch("main"), branch("feature")]
        );
        assert_eq!(history.commits()[1].parents.len(), 1);
    }

    #[test]
    fn parses_bare_array() {
        let text = r#"[
            {"commit_hash": "a", "branch": "side"},
            {"commit_hash": "b", "branch": "main", "parent_commits": ["a"]}
        ]"#;
        let history = History::parse(text).unwrap();
        assert!(history.declared_branches().is_empty());
        let order: Vec<&str> = history.branches().iter().map(|b| b.as_str()).collect();
        assert_eq!(order, vec!["side", "main"]);
    }

    #[test]
    fn merges_branch_logs_first_wins() {
        let text = r#"{"logs": [
            {"branch": "main", "commits": [
                {"commit_hash": "a", "message": "from main", "branch": "main"}
            ]},
            {"branch": "feature", "commits": [
                {"commit_hash": "a", "message": "repeat", "branch": "main"},
                {"commit_hash": "f", "branch": "feature", "parent_commits": ["a"]}
            ]}
        ]}"#;
        let history = History::parse(text).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.commits()[0].message, "from main");
        assert_eq!(
            history.declared_branches(),
            &[branch("main"), branch("feature")]
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let text = r#"{"commits": [], "branchez": []}"#;
        assert!(matches!(History::parse(text), Err(HistoryError::Invalid(_))));
    }

    #[test]
    fn rejects_scalar() {
        assert!(History::parse("42").is_err());
        assert!(History::parse("not json").is_err());
    }

    #[test]
    fn rejects_invalid_branch_name() {
        let text = r#"[{"commit_hash": "a", "branch": "bad name"}]"#;
        let err = History::parse(text).unwrap_err();
        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn default_visible_uses_declared_order() {
        let history = History::new(
            vec![branch("feature"), branch("main")],
            vec![commit("a", "main", &[]), commit("s", "side", &["a"])],
        );
        let default_visible = history.default_visible();
        let visible: Vec<&str> = default_visible
            .iter()
            .map(|b| b.as_str())
            .collect();
        assert_eq!(visible, vec!["feature", "main"]);
        assert_eq!(history.undeclared_branches(), vec![&branch("side")]);
    }

    #[test]
    fn default_visible_without_declaration() {
        let history = History::from_commits(vec![
            commit("a", "main", &[]),
            commit("b", "feature", &["a"]),
            commit("c", "main", &["b"]),
        ]);
        assert_eq!(history.default_visible().len(), 2);
        assert!(history.undeclared_branches().is_empty());
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let missing = History::load(&path).unwrap_err();
        assert!(matches!(missing, HistoryError::ReadError { .. }));

        fs::write(&path, "{").unwrap();
        let broken = History::load(&path).unwrap_err();
        assert!(matches!(broken, HistoryError::ParseError { .. }));
        assert!(broken.to_string().contains("history.json"));

        fs::write(&path, SNAPSHOT).unwrap();
        assert_eq!(History::load(&path).unwrap().len(), 3);
    }
}
