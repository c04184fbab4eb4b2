//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-shelf\config.toml
//! - macOS: ~/Library/Application Support/music-shelf/config.toml
//! - Linux: ~/.config/music-shelf/config.toml
//!
//! The config file is human-readable and editable. A missing or broken
//! file never stops startup; defaults are used instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::hit::HitTesting;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog location and media root
    pub library: LibraryConfig,

    /// Logical design size the layout is computed at
    pub window: WindowConfig,

    /// Pointer and wheel handling
    pub input: InputConfig,

    /// Audio settings
    pub audio: AudioConfig,

    /// Default tracing directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Config {
    /// Directory relative track locations are resolved against.
    ///
    /// Falls back to the catalog file's own directory.
    pub fn media_root(&self) -> PathBuf {
        match &self.library.media_root {
            Some(root) => root.clone(),
            None => self
                .library
                .catalog_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

/// Library settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Catalog descriptor file
    pub catalog_path: PathBuf,

    /// Base directory for relative track and artwork locations
    pub media_root: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("albums.txt"),
            media_root: None,
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub design_width: f32,
    pub design_height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            design_width: 1200.0,
            design_height: 900.0,
        }
    }
}

/// Input settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// "exact" uses the canvas scale, "probe" tries candidate scales
    pub hit_testing: HitTesting,

    /// Logical pixels scrolled per wheel notch
    pub scroll_step: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hit_testing: HitTesting::Exact,
            scroll_step: 40.0,
        }
    }
}

/// Audio playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Volume level (0.0 - 1.0)
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: LibraryConfig::default(),
            window: WindowConfig::default(),
            input: InputConfig::default(),
            audio: AudioConfig::default(),
            log_filter: "music_shelf=info".to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-shelf"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
///
/// Returns default config if file doesn't exist or can't be parsed.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path, with the same fallbacks.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Save configuration to `path`, creating its directory if needed.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
