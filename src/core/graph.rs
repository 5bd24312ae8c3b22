//! core::graph
//!
//! Commit index and depth resolution over the full commit history.
//!
//! # Architecture
//!
//! The history is a DAG where:
//! - Nodes are commits, keyed by hash
//! - Edges point from child to parent (stored as the commit's parent list)
//! - Roots are commits with no parents
//!
//! # Invariants
//!
//! - Depth is computed over the full history, never a filtered view, since
//!   an ancestor on a hidden branch still pushes its descendants down
//! - A parent hash that does not resolve contributes depth 0
//! - The graph is assumed acyclic. [`DepthResolver`] terminates on a cycle
//!   but its depths are then meaningless; [`CommitIndex::find_cycle`] exists
//!   for callers validating input at the boundary
//! - Both walks use explicit stacks, so very long histories do not exhaust
//!   the call stack

use super::types::{Commit, CommitHash};
use std::collections::{HashMap, HashSet};

/// Lookup from commit hash to commit record.
///
/// Borrowed from the commit slice it was built from. When the input holds
/// duplicate hashes the last record wins.
#[derive(Debug, Clone, Default)]
pub struct CommitIndex<'a> {
    by_hash: HashMap<&'a CommitHash, &'a Commit>,
}

impl<'a> CommitIndex<'a> {
    /// Index a commit list.
    pub fn build(commits: &'a [Commit]) -> Self {
        let mut by_hash = HashMap::with_capacity(commits.len());
        for commit in commits {
            by_hash.insert(&commit.hash, commit);
        }
        Self { by_hash }
    }

    /// Resolve a hash to its commit.
    pub fn get(&self, hash: &CommitHash) -> Option<&'a Commit> {
        self.by_hash.get(hash).copied()
    }

    /// Check if a hash resolves.
    pub fn contains(&self, hash: &CommitHash) -> bool {
        self.by_hash.contains_key(hash)
    }

    /// Number of distinct hashes indexed.
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Parent hashes of `commit` that do not resolve, in parent order.
    pub fn unresolved_parents<'c>(&self, commit: &'c Commit) -> Vec<&'c CommitHash> {
        commit
            .parents
            .iter()
            .filter(|p| !self.contains(p))
            .collect()
    }

    /// Check if the parent links contain a cycle.
    ///
    /// Returns `Some(hash)` for a commit that lies on a cycle. Unresolved
    /// parents are ignored. Hashes are visited in sorted order so the
    /// reported commit is deterministic.
    pub fn find_cycle(&self) -> Option<CommitHash> {
        let mut hashes: Vec<&CommitHash> = self.by_hash.keys().copied().collect();
        hashes.sort();

        let mut visited = HashSet::new();
        for hash in hashes {
            if let Some(found) = self.cycle_from(hash, &mut visited) {
                return Some(found.clone());
            }
        }
        None
    }

    /// Depth-first walk from `start` with an explicit stack.
    ///
    /// Each frame holds a commit on the current path and the index of the
    /// next parent to follow.
    fn cycle_from(
        &self,
        start: &'a CommitHash,
        visited: &mut HashSet<&'a CommitHash>,
    ) -> Option<&'a CommitHash> {
        if !visited.insert(start) {
            return None;
        }

        let mut path = HashSet::from([start]);
        let mut stack: Vec<(&'a CommitHash, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let (hash, next) = *frame;
            let Some(parent) = self.get(hash).and_then(|c| c.parents.get(next)) else {
                path.remove(hash);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let Some(parent) = self.get(parent) else {
                continue;
            };
            let parent = &parent.hash;
            if path.contains(parent) {
                return Some(parent);
            }
            if visited.insert(parent) {
                path.insert(parent);
                stack.push((parent, 0));
            }
        }
        None
    }
}

/// Longest-path-from-root depth, memoized per resolver.
///
/// A resolver is meant to live for one layout pass: create it, query every
/// commit of interest, drop it. Shared ancestors of merge commits are
/// computed once, so a full pass costs O(V + E) over the reachable graph.
///
/// # Example
///
/// ```
/// use commit_lanes::core::graph::{CommitIndex, DepthResolver};
/// use commit_lanes::core::types::{BranchName, Commit, CommitHash};
///
/// let main = BranchName::new("main").unwrap();
/// let hash = |s: &str| CommitHash::new(s).unwrap();
/// let commits = vec![
///     Commit::new(hash("a"), "root", main.clone()),
///     Commit::new(hash("b"), "next", main.clone()).with_parents([hash("a")]),
///     Commit::new(hash("c"), "lost", main).with_parents([hash("gone")]),
/// ];
///
/// let index = CommitIndex::build(&commits);
/// let mut depths = DepthResolver::new(&index);
/// assert_eq!(depths.depth(&commits[0]), 0);
/// assert_eq!(depths.depth(&commits[1]), 1);
/// // A missing parent counts as a root.
/// assert_eq!(depths.depth(&commits[2]), 1);
/// ```
#[derive(Debug)]
pub struct DepthResolver<'i, 'a> {
    index: &'i CommitIndex<'a>,
    memo: HashMap<&'a CommitHash, usize>,
}

impl<'i, 'a> DepthResolver<'i, 'a> {
    /// Create a resolver with an empty memo table.
    pub fn new(index: &'i CommitIndex<'a>) -> Self {
        Self {
            index,
            memo: HashMap::new(),
        }
    }

    /// Depth of `commit`.
    ///
    /// Walks ancestors with an explicit stack, settling a commit once all of
    /// its resolvable parents are settled, so history length is not bounded
    /// by the call stack. On cyclic input a parent that is still being
    /// resolved counts as 0; the result is then meaningless but the call
    /// returns.
    pub fn depth(&mut self, commit: &'a Commit) -> usize {
        if let Some(&depth) = self.memo.get(&commit.hash) {
            return depth;
        }

        let index = self.index;
        let mut entered: HashSet<&'a CommitHash> = HashSet::new();
        let mut stack = vec![commit];

        while let Some(&current) = stack.last() {
            if self.memo.contains_key(&current.hash) {
                stack.pop();
                continue;
            }
            let first_visit = entered.insert(&current.hash);

            let mut deepest_parent = 0;
            let mut pending = false;
            for parent in current.parents.iter().filter_map(|hash| index.get(hash)) {
                match self.memo.get(&parent.hash) {
                    Some(&depth) => deepest_parent = deepest_parent.max(depth),
                    None if first_visit && !entered.contains(&parent.hash) => {
                        stack.push(parent);
                        pending = true;
                    }
                    None => {}
                }
            }
            if pending {
                continue;
            }

            let depth = if current.is_root() { 0 } else { deepest_parent + 1 };
            self.memo.insert(&current.hash, depth);
            stack.pop();
        }

        self.memo.get(&commit.hash).copied().unwrap_or(0)
    }

    /// Depth of the commit a hash resolves to, if any.
    pub fn depth_of(&mut self, hash: &CommitHash) -> Option<usize> {
        let commit = self.index.get(hash)?;
        Some(self.depth(commit))
    }

    /// Number of memoized depths.
    pub fn resolved(&self) -> usize {
        self.memo.len()
    }
}
