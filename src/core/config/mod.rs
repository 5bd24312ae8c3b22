//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! commit-lanes has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Overrides for one working directory
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$COMMIT_LANES_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/commit-lanes/config.toml`
//! 3. `~/.commit-lanes/config.toml`
//!
//! # Project Config Location
//!
//! `.commit-lanes.toml` in the working directory.
//!
//! # Example
//!
//! ```no_run
//! use commit_lanes::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! let layout = config.layout();
//! println!("lanes are {} apart", layout.lane_spacing);
//! println!("labels cut at {}", config.max_message_len());
//! ```

pub mod schema;

pub use schema::{ConfigFile, DisplaySection, LayoutSection};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::layout::LayoutConfig;
use crate::core::lanes::VisibleBranches;
use crate::core::types::BranchName;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "COMMIT_LANES_CONFIG";

/// Project config file name.
pub const PROJECT_FILE: &str = ".commit-lanes.toml";

/// Default label length.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 20;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: project over global over
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ConfigFile,
    /// Project configuration (if found)
    pub project: Option<ConfigFile>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Build a configuration from already-parsed files.
    pub fn from_files(global: ConfigFile, project: Option<ConfigFile>) -> Self {
        Self {
            global,
            project,
            global_path: None,
            project_path: None,
        }
    }

    /// Load configuration from the standard locations.
    ///
    /// If `project_dir` is provided, also loads `.commit-lanes.toml` from it.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed, or if
    /// the merged values are invalid. Missing files are not an error.
    pub fn load(project_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global_path = Self::find_global(&mut warnings);
        let mut result = Self::load_from(global_path.as_deref(), project_dir)?;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        Ok(result)
    }

    /// Load configuration from explicit locations.
    ///
    /// `global` must point at an existing file if given; `project_dir` is
    /// searched for the project file.
    pub fn load_from(
        global: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let (global_file, global_path) = match global {
            Some(path) => (Self::read_file(path)?, Some(path.to_path_buf())),
            None => (ConfigFile::default(), None),
        };

        let (project, project_path) = match project_dir.map(|d| d.join(PROJECT_FILE)) {
            Some(path) if path.exists() => (Some(Self::read_file(&path)?), Some(path)),
            _ => (None, None),
        };

        let config = Config {
            global: global_file,
            project,
            global_path,
            project_path,
        };
        config.validate()?;

        Ok(ConfigLoadResult {
            config,
            warnings: Vec::new(),
        })
    }

    /// Locate the global config file, if any.
    fn find_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $COMMIT_LANES_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: format!("{} points to a missing file; ignoring it", CONFIG_ENV),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/commit-lanes/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("commit-lanes/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.commit-lanes/config.toml
        dirs::home_dir()
            .map(|home| home.join(".commit-lanes/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read, parse and validate one config file.
    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// Check constraints across merged values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the popup margin leaves no room
    /// for a popup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = self.layout();
        let narrowest = layout.lane_spacing.min(layout.depth_spacing);
        if layout.popup_margin >= narrowest {
            return Err(ConfigError::InvalidValue(format!(
                "layout.popup_margin ({}) must be smaller than both spacings ({} and {})",
                layout.popup_margin, layout.lane_spacing, layout.depth_spacing
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn layout_sections(&self) -> impl Iterator<Item = &LayoutSection> {
        let global = self.global.layout.as_ref();
        let project = self.project.as_ref().and_then(|p| p.layout.as_ref());
        global.into_iter().chain(project)
    }

    fn display_sections(&self) -> impl Iterator<Item = &DisplaySection> {
        let global = self.global.display.as_ref();
        let project = self.project.as_ref().and_then(|p| p.display.as_ref());
        global.into_iter().chain(project)
    }

    /// Effective layout geometry.
    pub fn layout(&self) -> LayoutConfig {
        let mut layout = LayoutConfig::default();
        for section in self.layout_sections() {
            let LayoutSection {
                base_x,
                base_y,
                lane_spacing,
                depth_spacing,
                header_offset,
                popup_margin,
                canvas_padding,
            } = section;
            layout.base_x = base_x.unwrap_or(layout.base_x);
            layout.base_y = base_y.unwrap_or(layout.base_y);
            layout.lane_spacing = lane_spacing.unwrap_or(layout.lane_spacing);
            layout.depth_spacing = depth_spacing.unwrap_or(layout.depth_spacing);
            layout.header_offset = header_offset.unwrap_or(layout.header_offset);
            layout.popup_margin = popup_margin.unwrap_or(layout.popup_margin);
            layout.canvas_padding = canvas_padding.unwrap_or(layout.canvas_padding);
        }
        layout
    }

    /// Configured default branch selection, if any.
    ///
    /// Names were validated at load time; any that fail here are skipped.
    pub fn visible(&self) -> Option<VisibleBranches> {
        let names = self
            .display_sections()
            .filter_map(|d| d.visible.as_ref())
            .last()?;
        Some(
            names
                .iter()
                .filter_map(|n| BranchName::new(n.as_str()).ok())
                .collect(),
        )
    }

    /// Label length limit.
    ///
    /// Defaults to 20 if not configured.
    pub fn max_message_len(&self) -> usize {
        self.display_sections()
            .filter_map(|d| d.max_message_len)
            .last()
            .unwrap_or(DEFAULT_MAX_MESSAGE_LEN)
    }

    /// The effective configuration as a fully populated file.
    pub fn effective(&self) -> ConfigFile {
        let layout = self.layout();
        ConfigFile {
            layout: Some(LayoutSection {
                base_x: Some(layout.base_x),
                base_y: Some(layout.base_y),
                lane_spacing: Some(layout.lane_spacing),
                depth_spacing: Some(layout.depth_spacing),
                header_offset: Some(layout.header_offset),
                popup_margin: Some(layout.popup_margin),
                canvas_padding: Some(layout.canvas_padding),
            }),
            display: Some(DisplaySection {
                visible: self
                    .visible()
                    .map(|v| v.iter().map(|b| b.to_string()).collect()),
                max_message_len: Some(self.max_message_len()),
            }),
        }
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
