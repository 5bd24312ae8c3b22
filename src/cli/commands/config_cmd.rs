//! config command - Print the effective configuration

use anyhow::{Context as _, Result};

use super::report_config;
use crate::engine::Context;
use crate::ui::output::Verbosity;

/// Print the merged configuration as TOML.
pub fn config(ctx: &Context) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (config, warnings) = ctx.load_config().context("failed to load config")?;
    report_config(&config, &warnings, verbosity);

    let text = toml::to_string_pretty(&config.effective()).context("failed to render config")?;
    print!("{}", text);
    Ok(())
}
