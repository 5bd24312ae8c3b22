//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens a [`Session`] for the history file
//! 2. Builds a [`GraphView`] for the requested selection
//! 3. Formats and displays output
//!
//! With `--json`, stdout carries only the JSON document; warnings and debug
//! lines still go to stderr.

mod check;
mod completion;
mod config_cmd;
mod edges;
mod info;
mod layout;
mod navigate;

pub use check::check;
pub use completion::completion;
pub use config_cmd::config;
pub use edges::edges;
pub use info::info;
pub use layout::layout;
pub use navigate::navigate;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::args::{Command, ViewArgs};
use crate::core::config::{Config, ConfigWarning};
use crate::core::lanes::VisibleBranches;
use crate::core::layout::PositionedCommit;
use crate::core::types::{BranchName, CommitHash};
use crate::engine::{Context, GraphView, Selection, Session};
use crate::ui::output::{self, Verbosity};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Layout { view } => layout::layout(ctx, &view),
        Command::Edges { view } => edges::edges(ctx, &view),
        Command::Navigate {
            view,
            from,
            direction,
        } => navigate::navigate(ctx, &view, &from, direction),
        Command::Info { view, hash } => info::info(ctx, &view, &hash),
        Command::Check { history } => check::check(ctx, &history),
        Command::Config => config_cmd::config(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// A history opened for layout, with its selection resolved.
pub(crate) struct Opened {
    pub session: Session,
    pub visible: VisibleBranches,
    pub verbosity: Verbosity,
}

impl Opened {
    pub fn view(&self) -> GraphView<'_> {
        GraphView::build(
            self.session.history.commits(),
            &self.visible,
            self.session.config.layout(),
        )
    }

    pub fn max_message_len(&self) -> usize {
        self.session.config.max_message_len()
    }
}

/// Load, check and select: the common prefix of every layout command.
///
/// Refuses histories with error-level issues. Warnings are summarized on
/// stderr.
pub(crate) fn open(ctx: &Context, args: &ViewArgs) -> Result<Opened> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let session = Session::open(ctx, &args.history).context("failed to open history")?;

    report_config(&session.config, &session.config_warnings, verbosity);
    output::debug(
        format!(
            "loaded {} commits on {} branches from {}",
            session.history.len(),
            session.history.branches().len(),
            session.path.display()
        ),
        verbosity,
    );

    session.ensure_layable()?;

    let warnings = session.health.warnings().count();
    if warnings > 0 {
        output::warn(
            format!(
                "history has {} warning(s); run 'lanes check' for details",
                warnings
            ),
            verbosity,
        );
    }

    let selection = Selection {
        branches: args.branches.clone(),
        show: args.show.clone(),
        hide: args.hide.clone(),
    };
    let visible = session.visible(&selection);

    let known = session.history.branches();
    for branch in visible.iter() {
        if !known.contains(&branch) {
            output::warn(format!("branch '{}' has no commits", branch), verbosity);
        }
    }
    let names: Vec<&str> = visible.iter().map(BranchName::as_str).collect();
    output::debug(format!("visible branches: [{}]", names.join(", ")), verbosity);

    Ok(Opened {
        session,
        visible,
        verbosity,
    })
}

/// Print config warnings and, in debug mode, where config came from.
pub(crate) fn report_config(config: &Config, warnings: &[ConfigWarning], verbosity: Verbosity) {
    for warning in warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }
    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), verbosity);
    }
    if let Some(path) = config.project_config_loaded_from() {
        output::debug(format!("project config: {}", path.display()), verbosity);
    }
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// One positioned commit, as shown to the user.
#[derive(Debug, Serialize)]
pub(crate) struct NodeRow<'a> {
    pub hash: &'a CommitHash,
    pub branch: &'a BranchName,
    pub label: String,
    pub depth: usize,
    pub lane: usize,
    pub x: i64,
    pub y: i64,
    pub has_external_parent: bool,
}

impl<'a> NodeRow<'a> {
    pub fn new(node: &PositionedCommit<'a>, max_message_len: usize) -> Self {
        Self {
            hash: node.hash(),
            branch: node.branch(),
            label: output::truncate_message(&node.commit.message, max_message_len),
            depth: node.depth,
            lane: node.lane,
            x: node.x,
            y: node.y,
            has_external_parent: node.has_external_parent,
        }
    }

    /// Single-line text rendering; `*` marks a hidden-branch parent.
    pub fn line(&self) -> String {
        let marker = if self.has_external_parent { '*' } else { ' ' };
        format!(
            "{} {:<10} {:<14} {:<14} {}",
            marker,
            self.hash.as_str(),
            self.branch.as_str(),
            format!("({}, {})", self.x, self.y),
            self.label
        )
    }
}
