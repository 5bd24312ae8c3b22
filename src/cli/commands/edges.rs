//! edges command - Print in-lane and external edges

use anyhow::Result;

use super::{open, print_json};
use crate::cli::args::ViewArgs;
use crate::core::edges::ExternalKind;
use crate::engine::Context;
use crate::ui::output;

/// List the edges of a layout.
pub fn edges(ctx: &Context, args: &ViewArgs) -> Result<()> {
    let opened = open(ctx, args)?;
    let view = opened.view();
    let edges = view.edges();
    let verbosity = opened.verbosity;

    output::debug(
        format!(
            "{} in-lane, {} external edges",
            edges.in_lane.len(),
            edges.external.len()
        ),
        verbosity,
    );

    if args.json {
        return print_json(edges);
    }

    if edges.is_empty() {
        output::print("no edges", verbosity);
        return Ok(());
    }

    for edge in &edges.in_lane {
        output::print(
            format!(
                "{} -> {}  {} -> {}",
                edge.parent, edge.child, edge.from, edge.to
            ),
            verbosity,
        );
    }
    for edge in &edges.external {
        let kind = match edge.kind {
            ExternalKind::HiddenBranch => "hidden",
            ExternalKind::Unresolved => "unresolved",
        };
        output::print(
            format!(
                "{} ~> {}  {} #{} at {}",
                edge.parent, edge.child, kind, edge.ordinal, edge.anchor
            ),
            verbosity,
        );
    }

    Ok(())
}
