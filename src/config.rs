//! Conversion settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConvertConfig {
    /// One subdirectory per effect.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,
    #[serde(default = "default_description_file")]
    pub description_file: String,
    /// Extension (without dot) of effect script files.
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
    #[serde(default = "default_module_suffix")]
    pub module_suffix: String,
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

fn default_source_dir() -> PathBuf { PathBuf::from("./Effet_premium") }
fn default_target_dir() -> PathBuf { PathBuf::from("./src/data/effects") }
fn default_description_file() -> String { "Description.txt".to_string() }
fn default_script_extension() -> String { "js".to_string() }
fn default_module_suffix() -> String { ".effect.js".to_string() }
fn default_index_file() -> String { "index.js".to_string() }

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            target_dir: default_target_dir(),
            description_file: default_description_file(),
            script_extension: default_script_extension(),
            module_suffix: default_module_suffix(),
            index_file: default_index_file(),
        }
    }
}

impl ConvertConfig {
    pub fn with_dirs(source_dir: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            ..Self::default()
        }
    }

    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn index_path(&self) -> PathBuf {
        self.target_dir.join(&self.index_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convert.json");
        fs::write(&path, r#"{"sourceDir": "effects-in", "moduleSuffix": ".mjs"}"#).unwrap();

        let config = ConvertConfig::load_from_file(&path).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("effects-in"));
        assert_eq!(config.module_suffix, ".mjs");
        assert_eq!(config.description_file, "Description.txt");
        assert_eq!(config.target_dir, default_target_dir());
    }

    #[test]
    fn test_malformed_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("convert.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ConvertConfig::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
