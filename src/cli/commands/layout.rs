//! layout command - Print lanes, positions and canvas size

use anyhow::Result;
use serde::Serialize;

use super::{open, print_json, NodeRow};
use crate::cli::args::ViewArgs;
use crate::core::layout::{BranchHeader, CanvasSize};
use crate::engine::Context;
use crate::ui::output;

#[derive(Serialize)]
struct LayoutOutput<'a> {
    headers: Vec<BranchHeader<'a>>,
    commits: Vec<NodeRow<'a>>,
    canvas: CanvasSize,
}

/// Lay out the visible branches of a history.
pub fn layout(ctx: &Context, args: &ViewArgs) -> Result<()> {
    let opened = open(ctx, args)?;
    let view = opened.view();
    let verbosity = opened.verbosity;

    output::debug(
        format!(
            "positioned {} of {} commits in {} lanes, max depth {}",
            view.layout().len(),
            opened.session.history.len(),
            view.layout().lane_count(),
            view.layout()
                .max_depth()
                .map_or_else(|| "-".to_string(), |d| d.to_string())
        ),
        verbosity,
    );

    let max_len = opened.max_message_len();
    let rows: Vec<NodeRow<'_>> = view
        .layout()
        .commits()
        .iter()
        .map(|node| NodeRow::new(node, max_len))
        .collect();

    if args.json {
        return print_json(&LayoutOutput {
            headers: view.headers(),
            commits: rows,
            canvas: view.canvas(),
        });
    }

    for header in view.headers() {
        output::print(
            format!(
                "lane {}: {} at ({}, {})",
                header.lane, header.branch, header.x, header.y
            ),
            verbosity,
        );
    }
    if rows.is_empty() {
        output::print("no commits on visible branches", verbosity);
    }
    for row in &rows {
        output::print(row.line(), verbosity);
    }
    let canvas = view.canvas();
    output::print(
        format!("canvas: {} x {}", canvas.width, canvas.height),
        verbosity,
    );

    Ok(())
}
