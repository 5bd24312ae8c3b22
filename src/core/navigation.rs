//! core::navigation
//!
//! Directional focus movement between positioned commits.
//!
//! # Rules
//!
//! | Direction | Candidates | Pick |
//! |---|---|---|
//! | up | same branch, `y` above | nearest (largest `y`) |
//! | down | same branch, `y` below | nearest (smallest `y`) |
//! | left | any lane, same `y`, `x` left | nearest (largest `x`) |
//! | right | any lane, same `y`, `x` right | nearest (smallest `x`) |
//!
//! When several candidates are equally near, up and left take the one
//! latest in layout order while down and right take the earliest. Finding
//! nothing is a normal outcome: the focus stays put.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::layout::{Layout, PositionedCommit};
use super::types::CommitHash;

/// Error parsing a direction name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid direction '{0}', must be one of: up, down, left, right")]
pub struct ParseDirectionError(String);

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find the commit to focus after moving from `current`.
///
/// `current` does not need to be an element of `positions`; it is compared
/// by coordinates and branch only.
pub fn navigate<'p, 'a>(
    positions: &'p [PositionedCommit<'a>],
    current: &PositionedCommit<'_>,
    direction: Direction,
) -> Option<&'p PositionedCommit<'a>> {
    let mut best: Option<&'p PositionedCommit<'a>> = None;

    for candidate in positions {
        // Distance along the axis of travel; only strictly positive counts.
        let distance = match direction {
            Direction::Up | Direction::Down => {
                if candidate.branch() != current.branch() {
                    continue;
                }
                if direction == Direction::Up {
                    current.y - candidate.y
                } else {
                    candidate.y - current.y
                }
            }
            Direction::Left | Direction::Right => {
                if candidate.y != current.y {
                    continue;
                }
                if direction == Direction::Left {
                    current.x - candidate.x
                } else {
                    candidate.x - current.x
                }
            }
        };
        if distance <= 0 {
            continue;
        }

        let closer = match best {
            None => true,
            Some(b) => {
                let held = axis_distance(current, b, direction);
                match direction {
                    Direction::Up | Direction::Left => distance <= held,
                    Direction::Down | Direction::Right => distance < held,
                }
            }
        };
        if closer {
            best = Some(candidate);
        }
    }

    best
}

fn axis_distance(
    current: &PositionedCommit<'_>,
    other: &PositionedCommit<'_>,
    direction: Direction,
) -> i64 {
    match direction {
        Direction::Up => current.y - other.y,
        Direction::Down => other.y - current.y,
        Direction::Left => current.x - other.x,
        Direction::Right => other.x - current.x,
    }
}

/// Like [`navigate`], starting from a hash.
///
/// Returns `None` if `from` is not positioned in `layout`.
pub fn navigate_from<'l, 'a>(
    layout: &'l Layout<'a>,
    from: &CommitHash,
    direction: Direction,
) -> Option<&'l PositionedCommit<'a>> {
    let current = layout.get(from)?;
    navigate(layout.commits(), current, direction)
}

/// Caller-owned keyboard focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Focus {
    current: Option<CommitHash>,
}

impl Focus {
    /// No commit focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus a specific commit.
    pub fn on(hash: CommitHash) -> Self {
        Self {
            current: Some(hash),
        }
    }

    pub fn current(&self) -> Option<&CommitHash> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Move the focus one step.
    ///
    /// Returns the newly focused commit. When there is no target (nothing
    /// focused, focus not in the layout, or no neighbour that way) the
    /// focus is left unchanged and `None` is returned.
    pub fn step<'l, 'a>(
        &mut self,
        layout: &'l Layout<'a>,
        direction: Direction,
    ) -> Option<&'l PositionedCommit<'a>> {
        let from = self.current.as_ref()?;
        let next = navigate_from(layout, from, direction)?;
        self.current = Some(next.hash().clone());
        Some(next)
    }
}
