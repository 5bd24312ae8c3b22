//! navigate command - Resolve one arrow-key move

use anyhow::Result;
use serde::Serialize;

use super::{open, print_json, NodeRow};
use crate::cli::args::ViewArgs;
use crate::core::navigation::Direction;
use crate::core::types::CommitHash;
use crate::engine::Context;
use crate::ui::output;

#[derive(Serialize)]
struct NavigateOutput<'a> {
    from: &'a CommitHash,
    direction: Direction,
    to: Option<NodeRow<'a>>,
}

/// Print the commit focus would move to.
///
/// Finding nothing is not an error: focus simply stays where it is.
pub fn navigate(
    ctx: &Context,
    args: &ViewArgs,
    from: &CommitHash,
    direction: Direction,
) -> Result<()> {
    let opened = open(ctx, args)?;
    let view = opened.view();
    let verbosity = opened.verbosity;

    if view.positioned(from).is_none() {
        output::warn(
            format!("commit '{}' is not on a visible branch", from),
            verbosity,
        );
    }

    let target = view
        .navigate(from, direction)
        .map(|node| NodeRow::new(node, opened.max_message_len()));

    if args.json {
        return print_json(&NavigateOutput {
            from,
            direction,
            to: target,
        });
    }

    match target {
        Some(row) => output::print(row.line(), verbosity),
        None => output::print(format!("no commit {} of '{}'", direction, from), verbosity),
    }
    Ok(())
}
