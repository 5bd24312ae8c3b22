//! core::layout
//!
//! Position mapping: every commit on a visible branch gets a lane, a depth
//! and an `(x, y)` coordinate.
//!
//! # Coordinates
//!
//! ```text
//! x = base_x + lane  * lane_spacing
//! y = base_y + depth * depth_spacing
//! ```
//!
//! Lanes run left to right in visible-branch order; depth grows downward
//! from the roots. Coordinates saturate at the `i64` bounds instead of
//! overflowing.
//!
//! # Invariants
//!
//! - A layout never holds more commits than its input
//! - Positioned commits keep input order
//! - `has_external_parent` looks only at parents that resolve; a dangling
//!   parent hash never sets it

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::graph::{CommitIndex, DepthResolver};
use super::lanes::{LaneMap, VisibleBranches};
use super::types::{BranchName, Commit, CommitHash};

/// Geometry constants for a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// X of lane 0
    pub base_x: i64,
    /// Y of depth 0
    pub base_y: i64,
    /// Horizontal distance between lanes
    pub lane_spacing: i64,
    /// Vertical distance between depths
    pub depth_spacing: i64,
    /// Y of the branch header row
    pub header_offset: i64,
    /// Gap between a popup and the neighbouring lane/row
    pub popup_margin: i64,
    /// Extra room added to the canvas past the last lane and row
    pub canvas_padding: i64,
}

impl LayoutConfig {
    pub const DEFAULT_BASE_X: i64 = 50;
    pub const DEFAULT_BASE_Y: i64 = 100;
    pub const DEFAULT_SPACING: i64 = 150;
    pub const DEFAULT_HEADER_OFFSET: i64 = 40;
    pub const DEFAULT_POPUP_MARGIN: i64 = 20;
    pub const DEFAULT_CANVAS_PADDING: i64 = 100;
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_x: Self::DEFAULT_BASE_X,
            base_y: Self::DEFAULT_BASE_Y,
            lane_spacing: Self::DEFAULT_SPACING,
            depth_spacing: Self::DEFAULT_SPACING,
            header_offset: Self::DEFAULT_HEADER_OFFSET,
            popup_margin: Self::DEFAULT_POPUP_MARGIN,
            canvas_padding: Self::DEFAULT_CANVAS_PADDING,
        }
    }
}

/// A 2-D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A visible commit with its computed placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedCommit<'a> {
    pub commit: &'a Commit,
    pub depth: usize,
    pub lane: usize,
    pub x: i64,
    pub y: i64,
    pub has_external_parent: bool,
}

impl<'a> PositionedCommit<'a> {
    pub fn hash(&self) -> &'a CommitHash {
        &self.commit.hash
    }

    pub fn branch(&self) -> &'a BranchName {
        &self.commit.branch
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Label drawn above a lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchHeader<'v> {
    pub branch: &'v BranchName,
    pub lane: usize,
    pub x: i64,
    pub y: i64,
}

/// Drawing surface needed to hold a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasSize {
    pub width: i64,
    pub height: i64,
}

/// Largest popup that fits between neighbouring nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopupBounds {
    pub max_width: i64,
    pub max_height: i64,
}

/// Result of one position-mapping pass.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    config: LayoutConfig,
    commits: Vec<PositionedCommit<'a>>,
    by_hash: HashMap<&'a CommitHash, usize>,
    lane_count: usize,
}

impl<'a> Layout<'a> {
    /// Position every commit whose branch is visible.
    ///
    /// Depths come from the whole history in `index`, so hidden ancestors
    /// still count.
    ///
    /// # Example
    ///
    /// ```
    /// use commit_lanes::core::graph::CommitIndex;
    /// use commit_lanes::core::lanes::VisibleBranches;
    /// use commit_lanes::core::layout::{Layout, LayoutConfig};
    /// use commit_lanes::core::types::{BranchName, Commit, CommitHash};
    ///
    /// let main = BranchName::new("main").unwrap();
    /// let hash = |s: &str| CommitHash::new(s).unwrap();
    /// let commits = vec![
    ///     Commit::new(hash("a"), "root", main.clone()),
    ///     Commit::new(hash("b"), "next", main.clone()).with_parents([hash("a")]),
    /// ];
    /// let visible = VisibleBranches::from_iter([main]);
    ///
    /// let index = CommitIndex::build(&commits);
    /// let layout = Layout::compute(&commits, &index, &visible, LayoutConfig::default());
    /// let b = layout.get(&hash("b")).unwrap();
    /// assert_eq!((b.x, b.y), (50, 250));
    /// ```
    pub fn compute(
        commits: &'a [Commit],
        index: &CommitIndex<'a>,
        visible: &VisibleBranches,
        config: LayoutConfig,
    ) -> Self {
        let lanes = LaneMap::assign(visible);
        let mut depths = DepthResolver::new(index);

        let mut positioned = Vec::new();
        let mut by_hash = HashMap::new();

        for commit in commits {
            let Some(lane) = lanes.lane(&commit.branch) else {
                continue;
            };
            let depth = depths.depth(commit);
            let has_external_parent = commit.parents.iter().any(|hash| {
                index
                    .get(hash)
                    .is_some_and(|parent| !lanes.is_visible(&parent.branch))
            });

            by_hash.entry(&commit.hash).or_insert(positioned.len());
            positioned.push(PositionedCommit {
                commit,
                depth,
                lane,
                x: offset(config.base_x, lane, config.lane_spacing),
                y: offset(config.base_y, depth, config.depth_spacing),
                has_external_parent,
            });
        }

        Self {
            config,
            commits: positioned,
            by_hash,
            lane_count: lanes.len(),
        }
    }

    /// Positioned commits, in input order.
    pub fn commits(&self) -> &[PositionedCommit<'a>] {
        &self.commits
    }

    /// Positioned commit for a hash (first occurrence on duplicates).
    pub fn get(&self, hash: &CommitHash) -> Option<&PositionedCommit<'a>> {
        self.by_hash.get(hash).map(|&i| &self.commits[i])
    }

    /// Check if a hash is positioned.
    pub fn contains(&self, hash: &CommitHash) -> bool {
        self.by_hash.contains_key(hash)
    }

    /// Where a commit's info popup should be anchored.
    pub fn anchor(&self, hash: &CommitHash) -> Option<Point> {
        self.get(hash).map(PositionedCommit::point)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Number of lanes, including lanes with no commits.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Deepest positioned commit, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.commits.iter().map(|c| c.depth).max()
    }

    /// Header position for each visible branch.
    pub fn headers<'v>(&self, visible: &'v VisibleBranches) -> Vec<BranchHeader<'v>> {
        visible
            .iter()
            .enumerate()
            .map(|(lane, branch)| BranchHeader {
                branch,
                lane,
                x: offset(self.config.base_x, lane, self.config.lane_spacing),
                y: self.config.header_offset,
            })
            .collect()
    }

    /// Canvas large enough for every lane and row.
    ///
    /// An empty layout still reserves the first row.
    pub fn canvas(&self) -> CanvasSize {
        let lowest = self
            .commits
            .iter()
            .map(|c| c.y)
            .max()
            .unwrap_or(self.config.base_y);
        CanvasSize {
            width: offset(self.config.canvas_padding, self.lane_count, self.config.lane_spacing),
            height: lowest.saturating_add(self.config.canvas_padding),
        }
    }

    pub fn popup_bounds(&self) -> PopupBounds {
        PopupBounds {
            max_width: self.config.lane_spacing.saturating_sub(self.config.popup_margin),
            max_height: self.config.depth_spacing.saturating_sub(self.config.popup_margin),
        }
    }
}

/// `base + n * spacing`, clamped to the `i64` range.
fn offset(base: i64, n: usize, spacing: i64) -> i64 {
    let n = i64::try_from(n).unwrap_or(i64::MAX);
    base.saturating_add(n.saturating_mul(spacing))
}
