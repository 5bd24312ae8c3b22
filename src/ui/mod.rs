//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and label formatting
//!
//! # Design
//!
//! All console output goes through this module so `--quiet` and `--debug`
//! behave the same in every command. JSON output bypasses it and is
//! written directly to stdout.

pub mod output;
