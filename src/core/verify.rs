//! core::verify
//!
//! Boundary checks for a loaded history.
//!
//! The layout engine tolerates most malformed input (dangling parents,
//! duplicate hashes) and produces meaningless depths on cycles. This module
//! finds those problems up front so the caller can warn about them, or
//! refuse to lay out a history whose rows would be wrong.
//!
//! # Severity
//!
//! - Cycles are errors: depths along a cycle have no longest path
//! - Everything else is a warning: layout degrades but completes
//!
//! # Invariants
//!
//! - Never mutates the history
//! - Deterministic: the same history yields the same issues, in the same
//!   order, with the same IDs

use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

use super::graph::CommitIndex;
use super::history::History;
use super::types::{BranchName, CommitHash};

/// Severity of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Layout must not run
    Error,
    /// Layout runs but the picture may be misleading
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A stable issue identifier: `kind:hash(key)`.
///
/// # Example
///
/// ```
/// use commit_lanes::core::verify::IssueId;
///
/// let id = IssueId::new("unresolved-parent", "c->ghost");
/// assert!(id.as_str().starts_with("unresolved-parent:"));
/// assert_eq!(id, IssueId::new("unresolved-parent", "c->ghost"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueId(String);

impl IssueId {
    pub fn new(kind: &str, key: &str) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        Self(format!("{}:{}", kind, hex::encode(&digest[..4])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Parent links loop back on themselves
    Cycle { at: CommitHash },
    /// More than one record shares a hash
    DuplicateHash { hash: CommitHash, count: usize },
    /// A parent hash resolves to nothing
    UnresolvedParent { child: CommitHash, parent: CommitHash },
    /// A commit sits on a branch the file did not declare
    UndeclaredBranch { branch: BranchName },
}

impl Finding {
    fn kind(&self) -> &'static str {
        match self {
            Finding::Cycle { .. } => "cycle",
            Finding::DuplicateHash { .. } => "duplicate-hash",
            Finding::UnresolvedParent { .. } => "unresolved-parent",
            Finding::UndeclaredBranch { .. } => "undeclared-branch",
        }
    }

    fn key(&self) -> String {
        match self {
            Finding::Cycle { at } => at.to_string(),
            Finding::DuplicateHash { hash, .. } => hash.to_string(),
            Finding::UnresolvedParent { child, parent } => format!("{child}->{parent}"),
            Finding::UndeclaredBranch { branch } => branch.to_string(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Finding::Cycle { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::Cycle { at } => write!(f, "parent cycle through commit '{at}'"),
            Finding::DuplicateHash { hash, count } => {
                write!(f, "commit hash '{hash}' appears {count} times; the last copy is used")
            }
            Finding::UnresolvedParent { child, parent } => {
                write!(f, "commit '{child}' has unknown parent '{parent}'")
            }
            Finding::UndeclaredBranch { branch } => {
                write!(f, "branch '{branch}' is used but not declared")
            }
        }
    }
}

/// A finding with its identity and severity attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: IssueId,
    pub severity: Severity,
    pub finding: Finding,
}

impl Issue {
    pub fn new(finding: Finding) -> Self {
        Self {
            id: IssueId::new(finding.kind(), &finding.key()),
            severity: finding.severity(),
            finding,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

/// Issues found in one history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    issues: Vec<Issue>,
}

impl HealthReport {
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, finding: Finding) {
        self.issues.push(Issue::new(finding));
    }
}

/// Check a history for everything the layout engine would silently
/// tolerate, plus cycles.
///
/// Errors come first, then warnings in history order.
pub fn check(history: &History) -> HealthReport {
    let mut report = HealthReport::default();
    let commits = history.commits();
    let index = CommitIndex::build(commits);

    if let Some(at) = index.find_cycle() {
        report.push(Finding::Cycle { at });
    }

    let mut counts: HashMap<&CommitHash, usize> = HashMap::new();
    for commit in commits {
        *counts.entry(&commit.hash).or_default() += 1;
    }
    let mut reported: HashSet<&CommitHash> = HashSet::new();
    for commit in commits {
        let count = counts[&commit.hash];
        if count > 1 && reported.insert(&commit.hash) {
            report.push(Finding::DuplicateHash {
                hash: commit.hash.clone(),
                count,
            });
        }
    }

    for commit in commits {
        for parent in index.unresolved_parents(commit) {
            report.push(Finding::UnresolvedParent {
                child: commit.hash.clone(),
                parent: parent.clone(),
            });
        }
    }

    for branch in history.undeclared_branches() {
        report.push(Finding::UndeclaredBranch {
            branch: branch.clone(),
        });
    }

    report
}
