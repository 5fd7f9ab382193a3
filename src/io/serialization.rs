// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Settings serialization and deserialization.
//!
//! This module reads serde types in YAML and JSON formats,
//! picking the format from the file extension.

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Import data from YAML format.
pub fn import_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import data from JSON format.
pub fn import_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Import data, choosing YAML or JSON from the file extension.
pub fn import<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported file extension: {:?}", extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    #[test]
    fn test_yaml_and_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EditorConfig::default();
        config.export_file_stem = "poster".to_string();

        let yaml_path = dir.path().join("settings.yaml");
        std::fs::write(&yaml_path, serde_yaml::to_string(&config).unwrap()).unwrap();
        let loaded: EditorConfig = import(&yaml_path).unwrap();
        assert_eq!(loaded, config);

        let json_path = dir.path().join("settings.json");
        std::fs::write(&json_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded: EditorConfig = import(&json_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "canvas_width = 800\n").unwrap();
        assert!(import::<EditorConfig>(&path).is_err());
    }
}
