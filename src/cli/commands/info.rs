//! info command - Show one commit with its placement and popup geometry

use anyhow::{bail, Result};
use serde::Serialize;

use super::{open, print_json};
use crate::cli::args::ViewArgs;
use crate::core::edges::ExternalEdge;
use crate::core::layout::{Point, PopupBounds};
use crate::core::types::{BranchName, CommitHash};
use crate::engine::Context;
use crate::ui::output;

#[derive(Serialize)]
struct Placement {
    lane: usize,
    anchor: Point,
    popup: PopupBounds,
}

#[derive(Serialize)]
struct InfoOutput<'a> {
    hash: &'a CommitHash,
    branch: &'a BranchName,
    message: &'a str,
    parents: &'a [CommitHash],
    depth: Option<usize>,
    visible: bool,
    placement: Option<Placement>,
    external: Vec<&'a ExternalEdge<'a>>,
    contents: &'a serde_json::Value,
}

/// Describe one commit.
pub fn info(ctx: &Context, args: &ViewArgs, hash: &CommitHash) -> Result<()> {
    let opened = open(ctx, args)?;
    let view = opened.view();
    let verbosity = opened.verbosity;

    let Some(commit) = view.index().get(hash) else {
        bail!("commit '{}' not found in {}", hash, args.history.display());
    };

    let placement = view.positioned(hash).map(|node| Placement {
        lane: node.lane,
        anchor: node.point(),
        popup: view.layout().popup_bounds(),
    });
    let info = InfoOutput {
        hash: &commit.hash,
        branch: &commit.branch,
        message: &commit.message,
        parents: &commit.parents,
        depth: view.depth_of(hash),
        visible: placement.is_some(),
        placement,
        external: view.external_of(hash),
        contents: &commit.contents,
    };

    if args.json {
        return print_json(&info);
    }

    output::print(format!("Commit: {}", info.hash), verbosity);
    output::print(format!("Branch: {}", info.branch), verbosity);
    output::print(format!("Message: {}", info.message), verbosity);
    if info.parents.is_empty() {
        output::print("Parents: (root)", verbosity);
    } else {
        output::print("Parents:", verbosity);
        output::print(output::format_list(info.parents, "  "), verbosity);
    }
    if let Some(depth) = info.depth {
        output::print(format!("Depth: {}", depth), verbosity);
    }
    match &info.placement {
        Some(p) => {
            output::print(format!("Lane: {}", p.lane), verbosity);
            output::print(format!("Anchor: {}", p.anchor), verbosity);
            output::print(
                format!("Popup: {} x {}", p.popup.max_width, p.popup.max_height),
                verbosity,
            );
        }
        None => output::print("Visible: no (branch hidden)", verbosity),
    }
    for edge in &info.external {
        output::print(
            format!("External parent #{}: {}", edge.ordinal, edge.parent),
            verbosity,
        );
    }

    Ok(())
}
