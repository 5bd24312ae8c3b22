//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::navigation::Direction;
use crate::core::types::{BranchName, CommitHash};

/// lanes - Lay out and navigate a multi-branch commit history
#[derive(Parser, Debug)]
#[command(name = "lanes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if lanes was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

fn parse_branch(s: &str) -> Result<BranchName, String> {
    BranchName::new(s).map_err(|e| e.to_string())
}

fn parse_hash(s: &str) -> Result<CommitHash, String> {
    CommitHash::new(s).map_err(|e| e.to_string())
}

/// History file plus branch selection, shared by the layout commands.
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// History file (JSON)
    #[arg(value_name = "HISTORY")]
    pub history: PathBuf,

    /// Show exactly these branches, in this lane order (repeatable)
    #[arg(short = 'b', long = "branch", value_name = "BRANCH", value_parser = parse_branch)]
    pub branches: Vec<BranchName>,

    /// Add a branch to the selection (repeatable)
    #[arg(long, value_name = "BRANCH", value_parser = parse_branch)]
    pub show: Vec<BranchName>,

    /// Remove a branch from the selection (repeatable)
    #[arg(long, value_name = "BRANCH", value_parser = parse_branch)]
    pub hide: Vec<BranchName>,

    /// Machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute lanes and positions for every visible commit
    #[command(
        name = "layout",
        long_about = "Compute lanes and positions for every visible commit.\n\n\
            Each visible branch gets a lane, left to right in selection order. Each \
            commit on a visible branch is placed at its lane and its depth (longest \
            parent path from a root). Commits on hidden branches are left out; a \
            commit whose parent sits on a hidden branch is marked with '*'.",
        after_help = "\
EXAMPLES:
    # Lay out every declared branch
    lanes layout history.json

    # Only main and feature, in that order
    lanes layout history.json -b main -b feature

    # Default selection minus one branch
    lanes layout history.json --hide experiment

SELECTION ORDER:
    1. --branch flags, if any
    2. display.visible from config
    3. branches declared by the history file (or first appearance)
    Then --show and --hide are applied."
    )]
    Layout {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// List in-lane and external edges
    #[command(
        name = "edges",
        long_about = "List the parent links of every visible commit.\n\n\
            In-lane edges join two visible commits. External edges lead to a parent \
            that is on a hidden branch or does not exist in the history; they are \
            numbered per child so renderers can fan them out."
    )]
    Edges {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Find the commit reached by an arrow key
    #[command(
        name = "navigate",
        long_about = "Find the commit reached by moving focus in one direction.\n\n\
            up/down stay on the focused commit's branch and pick the nearest commit \
            above or below. left/right stay on the same row and pick the nearest \
            commit in any lane. When nothing qualifies, focus does not move.",
        after_help = "\
EXAMPLES:
    lanes navigate history.json --from c3 down
    lanes navigate history.json --from c3 right --json"
    )]
    Navigate {
        #[command(flatten)]
        view: ViewArgs,

        /// Currently focused commit
        #[arg(long, value_name = "HASH", value_parser = parse_hash)]
        from: CommitHash,

        /// Direction to move: up, down, left or right
        #[arg(value_name = "DIRECTION")]
        direction: Direction,
    },

    /// Show details and popup geometry for one commit
    #[command(name = "info")]
    Info {
        #[command(flatten)]
        view: ViewArgs,

        /// Commit to describe
        #[arg(value_name = "HASH", value_parser = parse_hash)]
        hash: CommitHash,
    },

    /// Validate a history file
    #[command(
        name = "check",
        long_about = "Validate a history file.\n\n\
            Reports parent cycles (errors), duplicate hashes, parents that do not \
            resolve, and commits on undeclared branches (warnings). Exits non-zero \
            if any error is found; layout commands refuse such files."
    )]
    Check {
        /// History file (JSON)
        #[arg(value_name = "HISTORY")]
        history: PathBuf,
    },

    /// Print the effective configuration
    #[command(
        name = "config",
        long_about = "Print the effective configuration as TOML.\n\n\
            Values come from the built-in defaults, the global config file and \
            .commit-lanes.toml in the working directory, later sources winning."
    )]
    Config,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    lanes completion bash > ~/.local/share/bash-completion/completions/lanes

    # Zsh
    lanes completion zsh > ~/.zfunc/_lanes

    # Fish
    lanes completion fish > ~/.config/fish/completions/lanes.fish

    # PowerShell
    lanes completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
