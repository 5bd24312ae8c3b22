//! check command - Validate a history file

use anyhow::{bail, Context as _, Result};
use std::path::Path;

use super::report_config;
use crate::engine::{Context, Session};
use crate::ui::output::{self, Verbosity};

/// Report every issue in a history. Fails if any is an error.
pub fn check(ctx: &Context, history: &Path) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let session = Session::open(ctx, history).context("failed to open history")?;
    report_config(&session.config, &session.config_warnings, verbosity);

    let report = &session.health;
    for issue in report.issues() {
        let line = format!("[{}] {}", issue.id, issue.finding);
        if issue.is_error() {
            output::error(line);
        } else {
            output::warn(line, verbosity);
        }
    }

    let errors = report.errors().count();
    if errors > 0 {
        bail!("{} has {} error(s)", history.display(), errors);
    }

    output::success(
        format!(
            "ok: {} commits on {} branches, {} warning(s)",
            session.history.len(),
            session.history.branches().len(),
            report.warnings().count()
        ),
        verbosity,
    );
    Ok(())
}
