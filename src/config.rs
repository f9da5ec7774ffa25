use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants;
use crate::player::ContinuationPolicy;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_controls_timeout")]
    pub controls_timeout_ms: u64,

    #[serde(default = "default_touch_controls_timeout")]
    pub touch_controls_timeout_ms: u64,

    #[serde(default = "default_media_info_delay")]
    pub media_info_delay_ms: u64,

    #[serde(default = "default_intro_duration")]
    pub intro_duration_ms: u64,

    #[serde(default = "default_intro_fade")]
    pub intro_fade_ms: u64,

    #[serde(default = "default_preview_window")]
    pub preview_window_secs: f64,

    #[serde(default)]
    pub continuation_policy: ContinuationPolicy,

    #[serde(default = "default_seek_step")]
    pub seek_step_secs: f64,

    #[serde(default = "default_volume_step")]
    pub volume_step: f64,

    #[serde(default = "default_true")]
    pub autoplay: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        info!("Config loaded successfully");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("reelflix").join("config.toml"))
    }
}

impl PlayerConfig {
    pub fn controls_timeout(&self) -> Duration {
        Duration::from_millis(self.controls_timeout_ms)
    }

    pub fn touch_controls_timeout(&self) -> Duration {
        Duration::from_millis(self.touch_controls_timeout_ms)
    }

    pub fn media_info_delay(&self) -> Duration {
        Duration::from_millis(self.media_info_delay_ms)
    }

    /// Animation plus fade-out; the intro completes when both have elapsed
    pub fn intro_total(&self) -> Duration {
        Duration::from_millis(self.intro_duration_ms + self.intro_fade_ms)
    }
}

impl CatalogConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            controls_timeout_ms: default_controls_timeout(),
            touch_controls_timeout_ms: default_touch_controls_timeout(),
            media_info_delay_ms: default_media_info_delay(),
            intro_duration_ms: default_intro_duration(),
            intro_fade_ms: default_intro_fade(),
            preview_window_secs: default_preview_window(),
            continuation_policy: ContinuationPolicy::default(),
            seek_step_secs: default_seek_step(),
            volume_step: default_volume_step(),
            autoplay: default_true(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

// Default value functions
fn default_controls_timeout() -> u64 { constants::CONTROLS_TIMEOUT_MS }
fn default_touch_controls_timeout() -> u64 { constants::TOUCH_CONTROLS_TIMEOUT_MS }
fn default_media_info_delay() -> u64 { constants::MEDIA_INFO_DELAY_MS }
fn default_intro_duration() -> u64 { constants::INTRO_DURATION_MS }
fn default_intro_fade() -> u64 { constants::INTRO_FADE_MS }
fn default_preview_window() -> f64 { constants::PREVIEW_WINDOW_SECS }
fn default_seek_step() -> f64 { constants::SEEK_STEP_SECS }
fn default_volume_step() -> f64 { constants::VOLUME_STEP }
fn default_cache_ttl() -> u64 { constants::CATALOG_CACHE_TTL_SECS }
fn default_true() -> bool { true }
