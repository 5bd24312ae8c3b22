//! core::lanes
//!
//! Visible branch selection and lane assignment.
//!
//! The visible set is ordered: a branch's position in it is its lane.
//! Branches outside the set have no lane and their commits are left out of
//! the layout.

use super::types::BranchName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered, duplicate-free selection of branches to display.
///
/// # Example
///
/// ```
/// use commit_lanes::core::lanes::VisibleBranches;
/// use commit_lanes::core::types::BranchName;
///
/// let main = BranchName::new("main").unwrap();
/// let feature = BranchName::new("feature").unwrap();
///
/// let mut visible = VisibleBranches::from_iter([main.clone(), feature.clone(), main.clone()]);
/// assert_eq!(visible.len(), 2);
///
/// visible.hide(&main);
/// assert_eq!(visible.position(&feature), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<BranchName>", into = "Vec<BranchName>")]
pub struct VisibleBranches(Vec<BranchName>);

impl VisibleBranches {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a branch if it is not already shown.
    ///
    /// Returns true if the selection changed.
    pub fn show(&mut self, branch: BranchName) -> bool {
        if self.contains(&branch) {
            return false;
        }
        self.0.push(branch);
        true
    }

    /// Remove a branch, shifting later lanes left.
    ///
    /// Returns true if the selection changed.
    pub fn hide(&mut self, branch: &BranchName) -> bool {
        let before = self.0.len();
        self.0.retain(|b| b != branch);
        self.0.len() != before
    }

    /// Show a hidden branch or hide a shown one.
    ///
    /// Returns true if the branch is visible afterwards.
    pub fn toggle(&mut self, branch: BranchName) -> bool {
        if self.hide(&branch) {
            false
        } else {
            self.show(branch)
        }
    }

    /// Check if a branch is shown.
    pub fn contains(&self, branch: &BranchName) -> bool {
        self.0.contains(branch)
    }

    /// Display position of a branch.
    pub fn position(&self, branch: &BranchName) -> Option<usize> {
        self.0.iter().position(|b| b == branch)
    }

    /// Branches in display order.
    pub fn iter(&self) -> impl Iterator<Item = &BranchName> {
        self.0.iter()
    }

    /// Number of shown branches.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<BranchName> for VisibleBranches {
    fn from_iter<I: IntoIterator<Item = BranchName>>(iter: I) -> Self {
        let mut visible = Self::new();
        for branch in iter {
            visible.show(branch);
        }
        visible
    }
}

impl From<Vec<BranchName>> for VisibleBranches {
    fn from(branches: Vec<BranchName>) -> Self {
        branches.into_iter().collect()
    }
}

impl From<VisibleBranches> for Vec<BranchName> {
    fn from(visible: VisibleBranches) -> Self {
        visible.0
    }
}

impl<'v> IntoIterator for &'v VisibleBranches {
    type Item = &'v BranchName;
    type IntoIter = std::slice::Iter<'v, BranchName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Lane index per visible branch.
///
/// Built once per layout from a [`VisibleBranches`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct LaneMap<'v> {
    lanes: HashMap<&'v BranchName, usize>,
}

impl<'v> LaneMap<'v> {
    /// Assign lanes in display order.
    pub fn assign(visible: &'v VisibleBranches) -> Self {
        let lanes = visible
            .iter()
            .enumerate()
            .map(|(lane, branch)| (branch, lane))
            .collect();
        Self { lanes }
    }

    /// Lane of a branch, or `None` if it is hidden.
    pub fn lane(&self, branch: &BranchName) -> Option<usize> {
        self.lanes.get(branch).copied()
    }

    /// Check if a branch has a lane.
    pub fn is_visible(&self, branch: &BranchName) -> bool {
        self.lanes.contains_key(branch)
    }

    /// Number of lanes.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// True if there are no lanes.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
