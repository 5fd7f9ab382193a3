// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor configuration.
//!
//! Every field has a default, so a configuration file only needs to list
//! the values it changes.

use crate::error::EditorError;
use crate::models::layer::Point;
use crate::models::text::{TextColor, TextProperties, MAX_FONT_SIZE, MIN_FONT_SIZE};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names searched for in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = [
    "image-text-editor.yaml",
    "image-text-editor.yml",
    "image-text-editor.json",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Where new text layers are placed
    pub text_origin: Point,
    /// JPEG encoder quality in (0, 1]
    pub jpeg_quality: f32,
    /// Exported files are named `<stem>.<format>`
    pub export_file_stem: String,
    /// Color behind transparent regions in formats without alpha
    pub jpeg_matte: TextColor,
    /// Property panel values at startup
    pub text: TextProperties,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            text_origin: Point::new(100.0, 100.0),
            jpeg_quality: 0.95,
            export_file_stem: "edited-image".to_string(),
            jpeg_matte: TextColor::new(255, 255, 255),
            text: TextProperties::default(),
        }
    }
}

impl EditorConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(EditorError::InvalidConfig(format!(
                "canvas size must be non-zero, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.jpeg_quality > 0.0 && self.jpeg_quality <= 1.0) {
            return Err(EditorError::InvalidConfig(format!(
                "jpeg_quality must be in (0, 1], got {}",
                self.jpeg_quality
            )));
        }
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.text.font_size) {
            return Err(EditorError::InvalidConfig(format!(
                "text.font_size must be in {}..={}, got {}",
                MIN_FONT_SIZE, MAX_FONT_SIZE, self.text.font_size
            )));
        }
        if self.export_file_stem.trim().is_empty() {
            return Err(EditorError::InvalidConfig(
                "export_file_stem must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration file (YAML or JSON by extension).
    pub fn load(path: &Path) -> Result<Self> {
        let config: EditorConfig = crate::io::serialization::import(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Find the first configuration file present in `dir`.
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Load the configuration from `dir`, falling back to defaults.
    ///
    /// An unreadable or invalid file is logged and ignored.
    pub fn discover(dir: &Path) -> Self {
        let Some(path) = Self::find_in(dir) else {
            log::debug!("No configuration file in {}, using defaults", dir.display());
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring configuration {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::text::FontFamily;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height), (800, 600));
        assert_eq!(config.text_origin, Point::new(100.0, 100.0));
        assert_eq!(config.jpeg_quality, 0.95);
        assert_eq!(config.export_file_stem, "edited-image");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image-text-editor.yaml");
        std::fs::write(
            &path,
            "canvas_width: 1024\ntext:\n  font_family: Courier New\n  color: \"#336699\"\n",
        )
        .unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.canvas_width, 1024);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.text.font_family, FontFamily::CourierNew);
        assert_eq!(config.text.color, TextColor::new(0x33, 0x66, 0x99));
        assert_eq!(config.text.font_size, 40);
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image-text-editor.json");
        std::fs::write(&path, r#"{"jpeg_quality": 0.5, "export_file_stem": "out"}"#).unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.jpeg_quality, 0.5);
        assert_eq!(config.export_file_stem, "out");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = EditorConfig::default();
        config.jpeg_quality = 1.5;
        assert!(config.validate().is_err());

        let mut config = EditorConfig::default();
        config.canvas_height = 0;
        assert!(config.validate().is_err());

        let mut config = EditorConfig::default();
        config.text.font_size = 0;
        assert!(config.validate().is_err());

        let mut config = EditorConfig::default();
        config.text.font_size = MAX_FONT_SIZE + 1;
        assert!(config.validate().is_err());
        config.text.font_size = MAX_FONT_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_discover_falls_back_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EditorConfig::discover(dir.path()), EditorConfig::default());

        std::fs::write(dir.path().join("image-text-editor.yaml"), "canvas_width: 0\n").unwrap();
        assert!(EditorConfig::find_in(dir.path()).is_some());
        assert_eq!(EditorConfig::discover(dir.path()), EditorConfig::default());
    }
}
