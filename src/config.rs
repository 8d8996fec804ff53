//! Configuration management for Hindi Typing Kit
//!
//! Provides persistent configuration that is loaded from a platform-specific
//! config file and falls back to defaults when the file is absent.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/hindi-typing-kit/config.toml` |
//! | macOS | `~/Library/Application Support/hindi-typing-kit/config.toml` |
//! | Windows | `%APPDATA%\hindi-typing-kit\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use hindi_typing_kit::Config;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.lesson.passage = "नमस्ते दुनिया".to_string();
//! config.save().expect("Failed to save config");
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub use crate::error::ConfigError;
use crate::keyboard::{KeyboardLayout, Keymap};

const APP_DIR: &str = "hindi-typing-kit";

/// Returns the path to the config file.
///
/// Creates the config directory if it doesn't exist.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dir()?.join("config.toml"))
}

/// Per-user application directory, created on first use
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join(APP_DIR);

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir)
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Practice passage and pass threshold
    pub lesson: LessonConfig,
    /// Keyboard layout selection
    #[serde(default)]
    pub layout: LayoutConfig,
    /// UI settings
    pub ui: UiConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Lesson configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonConfig {
    /// Text to practice, in ordinary composed Devanagari
    pub passage: String,
    /// Minimum accuracy (percent) for the attempt to count as passed
    pub min_accuracy: f64,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            passage: "नमस्ते भारत".to_string(),
            min_accuracy: 90.0,
        }
    }
}

impl LessonConfig {
    pub fn passed(&self, accuracy_percent: f64) -> bool {
        accuracy_percent >= self.min_accuracy
    }
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LayoutConfig {
    /// Custom layout TOML file; the built-in Remington GAIL layout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Refresh rate for UI updates (in Hz)
    pub refresh_rate_hz: u32,
    /// Show the next-key hint line
    pub show_hint: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 30,
            show_hint: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level filter used when `RUST_LOG` is not set
    pub level: String,
    /// Log file name inside the application directory
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "hindi-typing-kit.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get UI refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ui.refresh_rate_hz.max(1) as u64)
    }

    /// The configured keymap: the custom layout file if set, else built-in
    pub fn keymap(&self) -> Result<Arc<Keymap>, ConfigError> {
        match &self.layout.path {
            Some(path) => {
                let layout = KeyboardLayout::load_from(path)?;
                Ok(Arc::new(Keymap::new(layout)?))
            }
            None => Ok(Keymap::remington_gail()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("hindi-typing-kit-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.lesson.min_accuracy, 90.0);
        assert!(!config.lesson.passage.is_empty());
        assert_eq!(config.layout.path, None);
        assert_eq!(config.ui.refresh_rate_hz, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn config_refresh_interval() {
        let mut config = Config::default();
        config.ui.refresh_rate_hz = 60;
        assert_eq!(config.refresh_interval().as_micros(), 16666);
    }

    #[test]
    fn zero_refresh_rate_does_not_divide_by_zero() {
        let mut config = Config::default();
        config.ui.refresh_rate_hz = 0;
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn pass_threshold() {
        let lesson = LessonConfig::default();
        assert!(lesson.passed(90.0));
        assert!(!lesson.passed(89.9));
    }

    #[test]
    fn config_save_and_load_roundtrip() {
        let path = temp_path("config");

        let mut config = Config::default();
        config.lesson.passage = "कमल".to_string();
        config.ui.show_hint = false;

        config.save_to(&path).expect("Failed to save config");
        let loaded = Config::load_from(&path).expect("Failed to load config");

        assert_eq!(loaded.lesson.passage, "कमल");
        assert!(!loaded.ui.show_hint);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_load_missing_file_fails() {
        let result = Config::load_from(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn optional_sections_default() {
        let toml_str = r#"
[lesson]
passage = "घर"
min_accuracy = 75.0

[ui]
refresh_rate_hz = 20
show_hint = true
"#;
        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(config.lesson.passage, "घर");
        assert_eq!(config.lesson.min_accuracy, 75.0);
        assert_eq!(config.layout.path, None);
        assert_eq!(config.logging.file, "hindi-typing-kit.log");
    }

    #[test]
    fn builtin_keymap_when_no_layout_path() {
        let keymap = Config::default().keymap().unwrap();
        assert_eq!(keymap.layout().name, "Remington (GAIL)");
    }

    #[test]
    fn custom_layout_from_file() {
        let path = temp_path("layout");
        let layout = r#"
name = "custom"
[[rows]]
[[rows.keys]]
key = "A"
finger = 0
hand = "left"
outputs = { normal = "क" }
"#;
        fs::write(&path, layout).unwrap();

        let mut config = Config::default();
        config.layout.path = Some(path.clone());
        let keymap = config.keymap().unwrap();
        assert_eq!(keymap.layout().name, "custom");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_layout_file_is_a_config_error() {
        let mut config = Config::default();
        config.layout.path = Some(PathBuf::from("/nonexistent/layout.toml"));
        assert!(matches!(config.keymap(), Err(ConfigError::Layout(_))));
    }
}
