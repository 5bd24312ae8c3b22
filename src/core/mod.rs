//! core
//!
//! Domain types and the layout pipeline.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommitHash, BranchName, Commit
//! - [`history`] - Loading commit histories from JSON
//! - [`graph`] - Commit index and depth resolution
//! - [`lanes`] - Visible branch selection and lane assignment
//! - [`layout`] - Position mapping and canvas geometry
//! - [`edges`] - In-lane and external edge classification
//! - [`navigation`] - Arrow-key focus movement
//! - [`verify`] - Boundary checks on loaded histories
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid records past the loading boundary
//! - Layout passes borrow their input and never mutate it
//! - All computation is deterministic

pub mod config;
pub mod edges;
pub mod graph;
pub mod history;
pub mod lanes;
pub mod layout;
pub mod navigation;
pub mod types;
pub mod verify;

#[cfg(test)]
pub(crate) mod fixtures;
