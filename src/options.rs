//! Viewer options loaded from an optional JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Window geometry and presentation behavior. Every field has a default,
/// so an options file only needs the keys it wants to change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub window_width: u32,
    pub window_height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
            fullscreen: false,
            vsync: true,
        }
    }
}

impl ViewerOptions {
    /// Load options from `path`; `None` means defaults. A named file that
    /// is missing or malformed is an error, not a silent fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid options file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let options = ViewerOptions::load(None).unwrap();
        assert_eq!(options, ViewerOptions::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let options: ViewerOptions = serde_json::from_str(r#"{"fullscreen": true}"#).unwrap();
        assert!(options.fullscreen);
        assert_eq!(options.window_width, 1280);
        assert!(options.vsync);
    }

    #[test]
    fn test_round_trip() {
        let options = ViewerOptions {
            window_width: 1920,
            window_height: 1080,
            fullscreen: true,
            vsync: false,
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: ViewerOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_missing_named_file_is_an_error() {
        let result = ViewerOptions::load(Some(Path::new("does/not/exist.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join("trailhead-options-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = ViewerOptions::load(Some(&path));
        assert!(result.is_err());

        std::fs::remove_file(&path).ok();
    }
}
