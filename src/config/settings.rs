//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::dispatch::{DEBOUNCE_DELAY, VOLUME_STEP};

// ---------------------------------------------------------------------------
// DispatchConfig
// ---------------------------------------------------------------------------

/// Settings for the command dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Minimum milliseconds between two issued commands.
    pub debounce_ms: u64,
    /// Percentage points added or removed by one volume gesture.
    pub volume_step: u8,
}

impl DispatchConfig {
    /// The debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_DELAY.as_millis() as u64,
            volume_step: VOLUME_STEP,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Connection settings for the playback backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Base URL of the Web API (no trailing slash).
    pub base_url: String,
    /// OAuth access token.  `SPOTIFY_ACCESS_TOKEN` overrides this at startup.
    pub access_token: Option<String>,
    /// Maximum seconds to wait for any single playback request.
    pub timeout_secs: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spotify.com".into(),
            access_token: None,
            timeout_secs: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// InputConfig
// ---------------------------------------------------------------------------

/// Where hand observations come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File of JSON observation lines.  `None` reads standard input.
    pub path: Option<PathBuf>,
    /// Capacity of the reader → controller channel.
    pub channel_capacity: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            channel_capacity: 32,
        }
    }
}

// ---------------------------------------------------------------------------
// ReportConfig
// ---------------------------------------------------------------------------

/// Per-frame report output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Print one JSON report per processed frame to stdout.
    pub emit_json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { emit_json: true }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use gesture_remote::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(config.dispatch.volume_step > 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Debounce / volume step settings.
    pub dispatch: DispatchConfig,
    /// Playback backend connection.
    pub playback: PlaybackConfig,
    /// Observation source.
    pub input: InputConfig,
    /// Frame report output.
    pub report: ReportConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// so callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The access token to use: the environment variable wins over the file.
    pub fn resolve_access_token(&self) -> Option<String> {
        std::env::var("SPOTIFY_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.playback
                    .access_token
                    .clone()
                    .filter(|t| !t.trim().is_empty())
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
