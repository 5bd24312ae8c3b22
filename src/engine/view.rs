//! engine::view
//!
//! One-call layout pipeline.
//!
//! [`GraphView::build`] runs the index, lane, position and edge passes over
//! a borrowed commit slice and keeps every intermediate result, so callers
//! can ask follow-up questions (navigation, depth of a hidden commit) without
//! recomputing.

use crate::core::edges::{EdgeSet, ExternalEdge};
use crate::core::graph::{CommitIndex, DepthResolver};
use crate::core::lanes::VisibleBranches;
use crate::core::layout::{BranchHeader, CanvasSize, Layout, LayoutConfig, PositionedCommit};
use crate::core::navigation::{self, Direction};
use crate::core::types::{Commit, CommitHash};

/// Everything derived from one commit set and one visible selection.
#[derive(Debug, Clone)]
pub struct GraphView<'a> {
    index: CommitIndex<'a>,
    layout: Layout<'a>,
    edges: EdgeSet<'a>,
    visible: &'a VisibleBranches,
}

impl<'a> GraphView<'a> {
    /// Run the full pipeline.
    ///
    /// The commit graph must be acyclic; see [`crate::core::verify::check`].
    pub fn build(
        commits: &'a [Commit],
        visible: &'a VisibleBranches,
        config: LayoutConfig,
    ) -> Self {
        let index = CommitIndex::build(commits);
        let layout = Layout::compute(commits, &index, visible, config);
        let edges = EdgeSet::classify(&layout, &index);
        Self {
            index,
            layout,
            edges,
            visible,
        }
    }

    pub fn index(&self) -> &CommitIndex<'a> {
        &self.index
    }

    pub fn layout(&self) -> &Layout<'a> {
        &self.layout
    }

    pub fn edges(&self) -> &EdgeSet<'a> {
        &self.edges
    }

    pub fn visible(&self) -> &'a VisibleBranches {
        self.visible
    }

    /// One header per visible branch, in lane order.
    pub fn headers(&self) -> Vec<BranchHeader<'a>> {
        self.layout.headers(self.visible)
    }

    pub fn canvas(&self) -> CanvasSize {
        self.layout.canvas()
    }

    /// Positioned commit for `hash`, if visible.
    pub fn positioned(&self, hash: &CommitHash) -> Option<&PositionedCommit<'a>> {
        self.layout.get(hash)
    }

    /// Depth of any indexed commit, visible or not.
    pub fn depth_of(&self, hash: &CommitHash) -> Option<usize> {
        DepthResolver::new(&self.index).depth_of(hash)
    }

    /// External edges leaving `child`.
    pub fn external_of(&self, child: &CommitHash) -> Vec<&ExternalEdge<'a>> {
        self.edges.external_of(child)
    }

    /// Next focus from `from` in `direction`.
    pub fn navigate(
        &self,
        from: &CommitHash,
        direction: Direction,
    ) -> Option<&PositionedCommit<'a>> {
        navigation::navigate_from(&self.layout, from, direction)
    }
}
