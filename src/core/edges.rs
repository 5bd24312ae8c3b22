//! core::edges
//!
//! Classifies parent links of positioned commits.
//!
//! - An **in-lane** edge joins two positioned commits and is drawn as a
//!   solid connector.
//! - An **external** edge leads from a positioned commit to a parent that
//!   is either on a hidden branch or does not resolve at all. Renderers draw
//!   these as short dashed stubs, offset by the edge's ordinal.
//!
//! Edges are emitted per child in layout order, then per parent in parent
//! order. Nothing is de-duplicated: a parent listed twice yields two edges.

use serde::Serialize;

use super::graph::CommitIndex;
use super::layout::{Layout, Point};
use super::types::CommitHash;

/// A parent link where both ends are positioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InLaneEdge<'a> {
    pub parent: &'a CommitHash,
    pub child: &'a CommitHash,
    /// Parent position
    pub from: Point,
    /// Child position
    pub to: Point,
}

/// Why a parent is not on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalKind {
    /// Parent exists on a branch that is not visible
    HiddenBranch,
    /// Parent hash does not resolve
    Unresolved,
}

/// A parent link leaving the visible lanes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalEdge<'a> {
    pub parent: &'a CommitHash,
    pub child: &'a CommitHash,
    /// Child position
    pub anchor: Point,
    /// 0-based index among this child's external edges
    pub ordinal: usize,
    pub kind: ExternalKind,
}

/// Both edge classes for one layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeSet<'a> {
    pub in_lane: Vec<InLaneEdge<'a>>,
    pub external: Vec<ExternalEdge<'a>>,
}

impl<'a> EdgeSet<'a> {
    /// Classify every parent link of every positioned commit.
    pub fn classify(layout: &Layout<'a>, index: &CommitIndex<'a>) -> Self {
        let mut edges = Self::default();

        for child in layout.commits() {
            let commit = child.commit;
            let mut ordinal = 0;
            for parent in &commit.parents {
                if let Some(positioned) = layout.get(parent) {
                    edges.in_lane.push(InLaneEdge {
                        parent,
                        child: child.hash(),
                        from: positioned.point(),
                        to: child.point(),
                    });
                    continue;
                }

                let kind = if index.contains(parent) {
                    ExternalKind::HiddenBranch
                } else {
                    ExternalKind::Unresolved
                };
                edges.external.push(ExternalEdge {
                    parent,
                    child: child.hash(),
                    anchor: child.point(),
                    ordinal,
                    kind,
                });
                ordinal += 1;
            }
        }

        edges
    }

    /// External edges leaving one child.
    pub fn external_of(&self, child: &CommitHash) -> Vec<&ExternalEdge<'a>> {
        self.external.iter().filter(|e| e.child == child).collect()
    }

    pub fn len(&self) -> usize {
        self.in_lane.len() + self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_lane.is_empty() && self.external.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{commit, hash, visible};
    use crate::core::layout::LayoutConfig;
    use crate::core::types::Commit;

    fn classify(commits: &[Commit], shown: &[&str]) -> Vec<String> {
        let index = CommitIndex::build(commits);
        let shown = visible(shown);
        let layout = Layout::compute(commits, &index, &shown, LayoutConfig::default());
        let edges = EdgeSet::classify(&layout, &index);

        let mut out: Vec<String> = edges
            .in_lane
            .iter()
            .map(|e| format!("{}->{}", e.parent, e.child))
            .collect();
        out.extend(edges.external.iter().map(|e| {
            format!("{}~>{}#{}:{:?}", e.parent, e.child, e.ordinal, e.kind)
        }));
        out
    }

    #[test]
    fn linear_history_is_all_in_lane() {
        let commits = vec![
            commit("a", "main", &[]),
            commit("b", "main", &["a"]),
            commit("c", "main", &["b"]),
        ];
        assert_eq!(classify(&commits, &["main"]), vec!["a->b", "b->c"]);
    }

    #[test]
    fn cross_lane_parent_is_in_lane_when_visible() {
        let commits = vec![
            commit("a", "main", &[]),
            commit("f", "feature", &["a"]),
        ];
        assert_eq!(classify(&commits, &["main", "feature"]), vec!["a->f"]);
    }

    #[test]
    fn hidden_parent_is_external() {
        let commits = vec![
            commit("s", "side", &[]),
            commit("c", "main", &["s"]),
        ];
        assert_eq!(
            classify(&commits, &["main"]),
            vec!["s~>c#0:HiddenBranch"]
        );
    }

    #[test]
    fn unresolved_parent_is_external() {
        let commits = vec![commit("c", "main", &["ghost"])];
        assert_eq!(classify(&commits, &["main"]), vec!["ghost~>c#0:Unresolved"]);
    }

    #[test]
    fn ordinals_count_per_child() {
        let commits = vec![
            commit("a", "main", &[]),
            commit("s1", "side", &[]),
            commit("s2", "side", &[]),
            commit("m", "main", &["s1", "a", "s2"]),
            commit("n", "main", &["s1"]),
        ];
        assert_eq!(
            classify(&commits, &["main"]),
            vec![
                "a->m",
                "s1~>m#0:HiddenBranch",
                "s2~>m#1:HiddenBranch",
                "s1~>n#0:HiddenBranch",
            ]
        );
    }

    #[test]
    fn repeated_parent_is_not_deduplicated() {
        let commits = vec![commit("a", "main", &[]), commit("b", "main", &["a", "a"])];
        assert_eq!(classify(&commits, &["main"]), vec!["a->b", "a->b"]);
    }

    #[test]
    fn in_lane_edge_carries_endpoints() {
        let commits = vec![
            commit("a", "main", &[]),
            commit("f", "feature", &["a"]),
        ];
        let index = CommitIndex::build(&commits);
        let shown = visible(&["main", "feature"]);
        let layout = Layout::compute(&commits, &index, &shown, LayoutConfig::default());
        let edges = EdgeSet::classify(&layout, &index);

        assert_eq!(edges.len(), 1);
        let edge = &edges.in_lane[0];
        assert_eq!(edge.from, Point::new(50, 100));
        assert_eq!(edge.to, Point::new(200, 250));
    }

    #[test]
    fn external_of_filters_by_child() {
        let commits = vec![
            commit("s", "side", &[]),
            commit("c", "main", &["s", "ghost"]),
            commit("d", "main", &["c"]),
        ];
        let index = CommitIndex::build(&commits);
        let shown = visible(&["main"]);
        let layout = Layout::compute(&commits, &index, &shown, LayoutConfig::default());
        let edges = EdgeSet::classify(&layout, &index);

        assert_eq!(edges.external_of(&hash("c")).len(), 2);
        assert_eq!(edges.external_of(&hash("d")).len(), 0);
    }

    #[test]
    fn no_positions_no_edges() {
        let commits = vec![commit("a", "main", &[]), commit("b", "main", &["a"])];
        assert!(classify(&commits, &[]).is_empty());
    }
}
