//! Builders shared by unit tests.

use super::lanes::VisibleBranches;
use super::types::{BranchName, Commit, CommitHash};

pub(crate) fn hash(s: &str) -> CommitHash {
    CommitHash::new(s).unwrap()
}

pub(crate) fn branch(s: &str) -> BranchName {
    BranchName::new(s).unwrap()
}

pub(crate) fn commit(h: &str, b: &str, parents: &[&str]) -> Commit {
    Commit::new(hash(h), format!("commit {h}"), branch(b))
        .with_parents(parents.iter().map(|p| hash(p)))
}

pub(crate) fn visible(names: &[&str]) -> VisibleBranches {
    names.iter().map(|n| branch(n)).collect()
}
