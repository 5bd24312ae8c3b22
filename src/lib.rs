//! commit-lanes - Lay out and navigate a multi-branch commit history
//!
//! Given commits (hash, branch, parents) and an ordered set of visible
//! branches, commit-lanes assigns every visible commit a lane and a depth,
//! maps both to screen coordinates, classifies parent links as in-lane or
//! external, and resolves arrow-key focus movement between commits.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Loads and checks a history, then runs the layout pipeline
//! - [`core`] - Domain types, layout passes, validation and configuration
//! - [`ui`] - Console output
//!
//! # Correctness Invariants
//!
//! 1. Layout passes never mutate their input
//! 2. The same commits and selection always produce the same layout
//! 3. Only commits on visible branches are positioned
//! 4. Histories with parent cycles never reach the layout passes from the CLI

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
