//! User settings, read from `settings.json` in the platform config directory.
//!
//! Every field is optional in the file. Anything missing takes its default,
//! and a file that fails to parse is reported and ignored as a whole.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: u32,
    pub window_height: u32,
    pub fullscreen: bool,
    /// Root for shaders, textures, models and levels.
    pub asset_dir: PathBuf,
    /// Level file, relative to `asset_dir`.
    pub level: PathBuf,
    pub mouse_sensitivity: f32,
    /// Free fly speed in units per second.
    pub fly_speed: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 768,
            fullscreen: false,
            asset_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
            level: PathBuf::from("levels/00.txt"),
            mouse_sensitivity: 0.1,
            fly_speed: 5.0,
            fov: 75.0,
            near: 0.1,
            far: 300.0,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Where the settings file lives, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dungeon-crawler").join("settings.json"))
    }

    /// Parses settings from JSON.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Reads the settings file at `path`, falling back to defaults.
    ///
    /// Returns the settings together with a warning to report once logging is up.
    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        match std::fs::read_to_string(path) {
            Ok(s) => match Self::from_json(&s) {
                Ok(settings) => (settings, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("Ignoring malformed settings file {}: {e}", path.display())),
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Self::default(), None),
            Err(e) => (
                Self::default(),
                Some(format!("Failed to read settings file {}: {e}", path.display())),
            ),
        }
    }

    /// Reads the settings from the default location.
    pub fn load() -> (Self, Option<String>) {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), None),
        }
    }

    /// Resolves a path relative to the asset directory.
    pub fn asset(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.asset_dir.join(relative)
    }

    /// Parses `log_level`, defaulting to `Info` for unknown names.
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_json(r#"{ "fov": 90.0, "level": "levels/01.txt" }"#).unwrap();
        assert_eq!(settings.fov, 90.0);
        assert_eq!(settings.level, PathBuf::from("levels/01.txt"));
        assert_eq!(settings.window_width, 1024);
        assert_eq!(settings.mouse_sensitivity, 0.1);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("crawler-settings-{}.json", std::process::id()));
        std::fs::write(&path, "{ fov: ").unwrap();
        let (settings, warning) = Settings::load_from(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(settings, Settings::default());
        assert!(warning.is_some());
    }

    #[test]
    fn test_missing_file_is_silent() {
        let (settings, warning) = Settings::load_from(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
        assert!(warning.is_none());
    }

    #[test]
    fn test_log_filter() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_filter(), log::LevelFilter::Info);
        settings.log_level = "debug".to_string();
        assert_eq!(settings.log_filter(), log::LevelFilter::Debug);
        settings.log_level = "loud".to_string();
        assert_eq!(settings.log_filter(), log::LevelFilter::Info);
    }
}
