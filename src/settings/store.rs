use crate::domain::UpNextSource;
use crate::error::SettingsError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SETTINGS_FILE: &str = "settings.json";
const MAX_QUEUE_LENGTH: usize = 50;

/// Tunables read once at startup. Nothing here is ever written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // Automation channel
    pub app_name: String,
    pub osascript_path: PathBuf,
    pub channel_timeout_secs: u64,

    // Sync cadence
    pub poll_interval_ms: u64,
    pub playlist_refresh_every: u32,
    pub tick_ms: u64,
    pub status_clear_secs: u64,
    pub command_concurrency: usize,

    // Controls
    pub volume_step: u8,
    pub seek_step_secs: u32,
    pub mute_fallback_volume: u8,

    /// Up-next strategies in the order they are tried.
    pub up_next_strategies: Vec<UpNextSource>,
    /// Entries read from the app's play queue each poll; 0 turns the read off.
    pub queue_length: usize,

    /// Force the ASCII (`Some(true)`) or Unicode (`Some(false)`) glyph set.
    pub ascii: Option<bool>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "Music".to_owned(),
            osascript_path: PathBuf::from("/usr/bin/osascript"),
            channel_timeout_secs: 5,

            poll_interval_ms: 2_000,
            playlist_refresh_every: 15,
            tick_ms: 200,
            status_clear_secs: 5,
            command_concurrency: 4,

            volume_step: 5,
            seek_step_secs: 10,
            mute_fallback_volume: 50,

            up_next_strategies: vec![UpNextSource::UiProbe, UpNextSource::PlaylistAdjacency],
            queue_length: 10,
            ascii: None,
        }
    }
}

impl AppSettings {
    pub fn channel_timeout(&self) -> Duration {
        Duration::from_secs(self.channel_timeout_secs.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(100))
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(16, 1_000))
    }

    pub fn status_clear(&self) -> Duration {
        Duration::from_secs(self.status_clear_secs)
    }

    fn validate(mut self) -> Result<Self, SettingsError> {
        if self.up_next_strategies.is_empty() {
            return Err(SettingsError::InvalidValue(
                "up_next_strategies must name at least one strategy".to_owned(),
            ));
        }
        if self.app_name.trim().is_empty() {
            return Err(SettingsError::InvalidValue("app_name is empty".to_owned()));
        }
        self.playlist_refresh_every = self.playlist_refresh_every.max(1);
        self.command_concurrency = self.command_concurrency.max(1);
        self.volume_step = self.volume_step.clamp(1, 100);
        self.mute_fallback_volume = self.mute_fallback_volume.min(100);
        self.queue_length = self.queue_length.min(MAX_QUEUE_LENGTH);
        Ok(self)
    }
}

pub fn default_settings_path() -> PathBuf {
    ProjectDirs::from("dev", "musictui", "musictui")
        .map(|p| p.config_dir().join(SETTINGS_FILE))
        .unwrap_or_else(|| std::env::temp_dir().join("musictui").join(SETTINGS_FILE))
}

fn parse_settings(path: &Path, bytes: &[u8]) -> Result<AppSettings, SettingsError> {
    let settings: AppSettings =
        serde_json::from_slice(bytes).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate()
}

/// Reads settings, treating a missing file as "all defaults".
pub fn try_load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    match fs::read(path) {
        Ok(bytes) => parse_settings(path, &bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
        Err(source) => Err(SettingsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads a file the user named explicitly: it must exist, parse and validate.
pub fn load_required_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    let bytes = fs::read(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(path, &bytes)
}

pub fn load_settings(path: &Path) -> AppSettings {
    try_load_settings(path).unwrap_or_else(|e| {
        tracing::warn!(err = %e, "settings unusable, falling back to defaults");
        AppSettings::default()
    })
}
