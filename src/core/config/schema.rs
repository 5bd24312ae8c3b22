//! core::config::schema
//!
//! Configuration file schema.
//!
//! Global and project files share one schema; every field is optional so a
//! file only needs to mention what it overrides.
//!
//! # Validation
//!
//! Each file is validated on its own after parsing (spacings positive,
//! geometry within [`MAX_LAYOUT_VALUE`], branch names well-formed). Constraints that relate fields from
//! different files are checked on the merged result in
//! [`super::Config::validate`].

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;

/// Largest magnitude accepted for any `[layout]` value.
pub const MAX_LAYOUT_VALUE: i64 = 1_000_000;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// [layout]
/// lane_spacing = 120
/// depth_spacing = 90
///
/// [display]
/// visible = ["main", "feature"]
/// max_message_len = 24
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Geometry overrides
    pub layout: Option<LayoutSection>,

    /// Display defaults
    pub display: Option<DisplaySection>,
}

impl ConfigFile {
    /// Validate the values this file sets.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(layout) = &self.layout {
            layout.validate()?;
        }
        if let Some(display) = &self.display {
            display.validate()?;
        }
        Ok(())
    }
}

/// `[layout]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    pub base_x: Option<i64>,
    pub base_y: Option<i64>,
    pub lane_spacing: Option<i64>,
    pub depth_spacing: Option<i64>,
    pub header_offset: Option<i64>,
    pub popup_margin: Option<i64>,
    pub canvas_padding: Option<i64>,
}

impl LayoutSection {
    fn values(&self) -> [(&'static str, Option<i64>); 7] {
        [
            ("base_x", self.base_x),
            ("base_y", self.base_y),
            ("lane_spacing", self.lane_spacing),
            ("depth_spacing", self.depth_spacing),
            ("header_offset", self.header_offset),
            ("popup_margin", self.popup_margin),
            ("canvas_padding", self.canvas_padding),
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in self.values() {
            if let Some(v) = value {
                if v.unsigned_abs() > MAX_LAYOUT_VALUE.unsigned_abs() {
                    return Err(ConfigError::InvalidValue(format!(
                        "layout.{key} must be between -{MAX_LAYOUT_VALUE} and {MAX_LAYOUT_VALUE}, got {v}"
                    )));
                }
            }
        }
        for (key, value) in [
            ("lane_spacing", self.lane_spacing),
            ("depth_spacing", self.depth_spacing),
        ] {
            if let Some(v) = value {
                if v <= 0 {
                    return Err(ConfigError::InvalidValue(format!(
                        "layout.{key} must be positive, got {v}"
                    )));
                }
            }
        }
        for (key, value) in [
            ("popup_margin", self.popup_margin),
            ("canvas_padding", self.canvas_padding),
        ] {
            if let Some(v) = value {
                if v < 0 {
                    return Err(ConfigError::InvalidValue(format!(
                        "layout.{key} cannot be negative, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// `[display]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    /// Branches shown when no `--branch` flag is given
    pub visible: Option<Vec<String>>,

    /// Commit messages longer than this are cut and suffixed with `...`
    pub max_message_len: Option<usize>,
}

impl DisplaySection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(visible) = &self.visible {
            for name in visible {
                BranchName::new(name.as_str()).map_err(|e| {
                    ConfigError::InvalidValue(format!("display.visible: {}", e))
                })?;
            }
        }
        if self.max_message_len == Some(0) {
            return Err(ConfigError::InvalidValue(
                "display.max_message_len must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let config = ConfigFile::default();
        assert!(config.layout.is_none());
        assert!(config.display.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            [layout]
            lane_spacing = 120
            "#,
        )
        .unwrap();
        let layout = config.layout.unwrap();
        assert_eq!(layout.lane_spacing, Some(120));
        assert!(layout.base_x.is_none());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<ConfigFile, _> = toml::from_str(
            r#"
            [layout]
            lane_spaceing = 120
            "#,
        );
        assert!(result.is_err());

        let result: Result<ConfigFile, _> = toml::from_str("[theme]\ncolor = \"red\"");
        assert!(result.is_err());
    }

    #[test]
    fn zero_spacing_rejected() {
        let config = ConfigFile {
            layout: Some(LayoutSection {
                depth_spacing: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("depth_spacing"));
    }

    #[test]
    fn negative_margin_rejected() {
        let section = LayoutSection {
            popup_margin: Some(-1),
            ..Default::default()
        };
        assert!(section.validate().is_err());
    }

    #[test]
    fn negative_base_allowed() {
        let section = LayoutSection {
            base_x: Some(-40),
            ..Default::default()
        };
        assert!(section.validate().is_ok());
    }

    #[test]
    fn layout_value_bounds() {
        let at_limit = LayoutSection {
            lane_spacing: Some(MAX_LAYOUT_VALUE),
            base_y: Some(-MAX_LAYOUT_VALUE),
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = LayoutSection {
            lane_spacing: Some(MAX_LAYOUT_VALUE + 1),
            ..Default::default()
        };
        let err = over.validate().unwrap_err();
        assert!(err.to_string().contains("lane_spacing"));

        let extreme = LayoutSection {
            base_x: Some(i64::MIN),
            ..Default::default()
        };
        assert!(extreme.validate().is_err());
    }

    #[test]
    fn oversized_spacing_rejected_from_toml() {
        let config: ConfigFile =
            toml::from_str("[layout]\nlane_spacing = 9223372036854775807\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("layout.lane_spacing"));
    }

    #[test]
    fn invalid_visible_branch_rejected() {
        let display = DisplaySection {
            visible: Some(vec!["main".to_string(), "bad..name".to_string()]),
            ..Default::default()
        };
        assert!(display.validate().is_err());
    }

    #[test]
    fn zero_message_len_rejected() {
        let display = DisplaySection {
            max_message_len: Some(0),
            ..Default::default()
        };
        assert!(display.validate().is_err());
    }

    #[test]
    fn roundtrip() {
        let config = ConfigFile {
            layout: Some(LayoutSection {
                base_x: Some(10),
                base_y: Some(20),
                lane_spacing: Some(100),
                depth_spacing: Some(80),
                header_offset: Some(5),
                popup_margin: Some(10),
                canvas_padding: Some(50),
            }),
            display: Some(DisplaySection {
                visible: Some(vec!["main".to_string()]),
                max_message_len: Some(30),
            }),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }
}
