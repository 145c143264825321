use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::grid::DisplayWindow;
use crate::session::{Semester, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub semester: Semester,
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default = "default_display_start_hour")]
    pub display_start_hour: u32,
    #[serde(default = "default_display_end_hour")]
    pub display_end_hour: u32,
}

fn default_server_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_font_scale() -> f32 {
    1.0
}

fn default_display_start_hour() -> u32 {
    7  // 7am
}

fn default_display_end_hour() -> u32 {
    23  // 11pm
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            user_id: None,
            semester: Semester::default(),
            font_scale: 1.0,
            display_start_hour: 7,
            display_end_hour: 23,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "classgrid", "classgrid")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Server root without trailing slashes, scheme added when missing
    pub fn base_url(&self) -> String {
        let url = self.server_url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        }
    }

    /// Configured grid hours, or 7am-11pm if the stored pair is unusable
    pub fn display_window(&self) -> DisplayWindow {
        match DisplayWindow::new(self.display_start_hour, self.display_end_hour) {
            Ok(window) => window,
            Err(e) => {
                log::warn!("{}, using default window", e);
                DisplayWindow::default()
            }
        }
    }

    pub fn session(&self) -> Session {
        Session::new(self.user_id.clone(), self.semester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config.server_url, "http://localhost:3001");
        assert_eq!(config.display_window(), DisplayWindow::default());
        assert_eq!(config.semester, Semester::Fall2025);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            user_id: Some("7654321".to_string()),
            semester: Semester::Winter2026,
            display_start_hour: 8,
            display_end_hour: 20,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.user_id.as_deref(), Some("7654321"));
        assert_eq!(loaded.semester, Semester::Winter2026);
        assert_eq!(loaded.display_window(), DisplayWindow::new(8, 20).unwrap());
        assert_eq!(loaded.session().current_semester(), Semester::Winter2026);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"server_url":"schedule.example.edu/"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url(), "http://schedule.example.edu");
        assert_eq!(config.display_end_hour, 23);
        assert_eq!(config.font_scale, 1.0);
    }

    #[test]
    fn bad_window_falls_back() {
        let config = Config {
            display_start_hour: 22,
            display_end_hour: 6,
            ..Config::default()
        };
        assert_eq!(config.display_window(), DisplayWindow::default());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
