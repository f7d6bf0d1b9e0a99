/// Application configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/media-gallery/config.json
/// - macOS: ~/Library/Application Support/media-gallery/config.json
/// - Windows: %APPDATA%\media-gallery\config.json
///
/// A missing file means defaults. Missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Where downloads are written (None = system download dir)
    pub download_dir: Option<PathBuf>,
    /// Fallback log filter when RUST_LOG is unset
    pub log_level: String,
    /// Gallery card size in logical pixels
    pub thumbnail_size: u16,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            download_dir: None,
            log_level: "info".to_string(),
            thumbnail_size: 200,
        }
    }
}

impl GalleryConfig {
    /// Load the config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load the config from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(|e| GalleryError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json(&json).map_err(|e| GalleryError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(test)]
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get the path where the config file is expected
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("media-gallery");
        path.push("config.json");
        path
    }

    /// Directory downloads are written to
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GalleryConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = GalleryConfig::from_json(r#"{ "thumbnail_size": 128 }"#).unwrap();
        assert_eq!(config.thumbnail_size, 128);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.download_dir, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = GalleryConfig::default();
        config.download_dir = Some(dir.path().join("out"));
        config.log_level = "debug".to_string();
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.download_dir(), dir.path().join("out"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            GalleryConfig::load_from(&path),
            Err(GalleryError::Config { .. })
        ));
    }
}
