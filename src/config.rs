use crate::estimate::{Mode, PlaybackSpeed};
use crate::playlist::PlaylistProvider;
use crate::playlist::youtube::YouTubeApiClient;
use crate::playlist::ytdlp::YtDlpProvider;
use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `PLPACE_PROVIDER__API_KEY`
pub const ENV_PREFIX: &str = "PLPACE";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    #[default]
    YtDlp,
    YoutubeApi,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    #[serde(default)]
    pub backend: Backend,
    /// YouTube Data API key, required by the `youtube-api` backend
    pub api_key: Option<String>,
    /// Optional API URL override for testing (e.g. mocking)
    pub api_url: Option<String>,
    #[serde(default = "default_yt_dlp_path")]
    pub yt_dlp_path: PathBuf,
    /// Read the flat playlist listing instead of resolving every video
    #[serde(default)]
    pub flat_playlist: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_yt_dlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            api_key: None,
            api_url: None,
            yt_dlp_path: default_yt_dlp_path(),
            flat_playlist: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_daily_hours")]
    pub daily_hours: f64,
}

fn default_mode() -> String {
    Mode::RemainingTime.as_str().to_string()
}

fn default_speed() -> f64 {
    1.0
}

fn default_daily_hours() -> f64 {
    1.0
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            speed: default_speed(),
            daily_hours: default_daily_hours(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("provider.timeout_secs must be greater than 0");
        }
        if self.backend == Backend::YoutubeApi
            && self.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
        {
            anyhow::bail!(
                "The youtube-api backend needs provider.api_key. Set it in config.toml or {}_PROVIDER__API_KEY",
                ENV_PREFIX
            );
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the configured metadata backend
    pub fn build_provider(&self) -> Result<Box<dyn PlaylistProvider>> {
        match self.backend {
            Backend::YtDlp => Ok(Box::new(
                YtDlpProvider::new(&self.yt_dlp_path)
                    .flat_playlist(self.flat_playlist)
                    .with_timeout(self.timeout()),
            )),
            Backend::YoutubeApi => {
                let key = self
                    .api_key
                    .as_deref()
                    .context("provider.api_key not set for the youtube-api backend")?;
                let mut client = YouTubeApiClient::new(key, self.timeout())
                    .context("Failed to build YouTube API client")?;
                if let Some(url) = &self.api_url {
                    client = client.with_base_url(url);
                }
                Ok(Box::new(client))
            }
        }
    }
}

impl DefaultsConfig {
    pub fn validate(&self) -> Result<()> {
        self.mode
            .parse::<Mode>()
            .with_context(|| format!("Invalid defaults.mode '{}'", self.mode))?;
        let speed = PlaybackSpeed::new(self.speed).context("Invalid defaults.speed")?;
        if !self.daily_hours.is_finite() {
            anyhow::bail!("defaults.daily_hours must be a number");
        }

        if !speed.is_preset() {
            log::warn!(
                "Speed {} is unusual. Common values: {:?}",
                self.speed,
                PlaybackSpeed::PRESETS
            );
        }
        Ok(())
    }
}

impl Config {
    /// Validate all configuration
    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.defaults.validate()?;
        Ok(())
    }
}

/// Load a config file (if present) and apply environment overrides.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let loader = ConfigBuilder::builder()
        .add_source(
            File::from(path.as_ref())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config loader")?;

    loader
        .try_deserialize()
        .context("Failed to parse config file")
}

/// Load from `explicit` or the default location, then validate.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => crate::platform::config_path()?,
    };

    log::debug!("Loading config from {}", path.display());
    let config = load_from_path(&path)?;
    config.validate()?;
    Ok(config)
}

pub fn save_to_path<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;

    std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

    Ok(())
}
