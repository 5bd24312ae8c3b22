//! engine
//!
//! Orchestrates a command: Load -> Check -> Build.
//!
//! # Architecture
//!
//! 1. **Load**: Read configuration and the history file ([`Session::open`])
//! 2. **Check**: Run boundary validation; refuse histories the layout passes
//!    cannot handle ([`Session::ensure_layable`])
//! 3. **Build**: Run the layout pipeline ([`GraphView::build`])
//!
//! The engine never prints. Commands decide what to show from the session's
//! health report and config warnings.
//!
//! # Example
//!
//! ```no_run
//! use commit_lanes::engine::{Context, GraphView, Selection, Session};
//! use std::path::Path;
//!
//! let ctx = Context::default();
//! let session = Session::open(&ctx, Path::new("history.json"))?;
//! session.ensure_layable()?;
//!
//! let visible = session.visible(&Selection::default());
//! let view = GraphView::build(session.history.commits(), &visible, session.config.layout());
//! println!("{} commits on screen", view.layout().len());
//! # Ok::<(), commit_lanes::engine::EngineError>(())
//! ```

pub mod view;

pub use view::GraphView;

use std::path::{Path, PathBuf};

use crate::core::config::{Config, ConfigError, ConfigWarning};
use crate::core::history::{History, HistoryError};
use crate::core::lanes::VisibleBranches;
use crate::core::types::BranchName;
use crate::core::verify::{self, HealthReport};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Directory used for relative paths and the project config.
    pub fn working_dir(&self) -> PathBuf {
        match &self.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir().join(path)
        }
    }

    /// Load configuration for the working directory.
    pub fn load_config(&self) -> Result<(Config, Vec<ConfigWarning>), EngineError> {
        let dir = self.working_dir();
        let result = Config::load(Some(dir.as_path()))?;
        Ok((result.config, result.warnings))
    }
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// History could not be loaded.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The history failed boundary validation.
    #[error("refusing to lay out '{path}': {reason}")]
    Refused { path: PathBuf, reason: String },
}

/// How the user wants the visible set adjusted.
///
/// `branches` replaces the default selection outright; `show` and `hide`
/// edit whatever selection is in effect, in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub branches: Vec<BranchName>,
    pub show: Vec<BranchName>,
    pub hide: Vec<BranchName>,
}

impl Selection {
    /// Compute the visible set.
    ///
    /// The starting set is, first match wins: explicit `branches`, the
    /// configured `display.visible`, the history's default order.
    pub fn resolve(&self, history: &History, config: &Config) -> VisibleBranches {
        let mut visible = if !self.branches.is_empty() {
            self.branches.iter().cloned().collect()
        } else if let Some(configured) = config.visible() {
            configured
        } else {
            history.default_visible()
        };

        for branch in &self.show {
            visible.show(branch.clone());
        }
        for branch in &self.hide {
            visible.hide(branch);
        }
        visible
    }
}

/// A loaded history with its configuration and health report.
#[derive(Debug, Clone)]
pub struct Session {
    pub path: PathBuf,
    pub history: History,
    pub config: Config,
    pub health: HealthReport,
    pub config_warnings: Vec<ConfigWarning>,
}

impl Session {
    /// Load configuration and the history at `path`, then check it.
    ///
    /// A history with errors still opens; call [`Session::ensure_layable`]
    /// before building a view.
    pub fn open(ctx: &Context, path: &Path) -> Result<Self, EngineError> {
        let (config, config_warnings) = ctx.load_config()?;
        let path = ctx.resolve(path);
        let history = History::load(&path)?;
        let health = verify::check(&history);

        Ok(Self {
            path,
            history,
            config,
            health,
            config_warnings,
        })
    }

    /// Fail if the history has any error-level issue.
    pub fn ensure_layable(&self) -> Result<(), EngineError> {
        match self.health.errors().next() {
            None => Ok(()),
            Some(issue) => Err(EngineError::Refused {
                path: self.path.clone(),
                reason: issue.finding.to_string(),
            }),
        }
    }

    /// Visible set for `selection` under this session's config.
    pub fn visible(&self, selection: &Selection) -> VisibleBranches {
        selection.resolve(&self.history, &self.config)
    }
}
