//! User configuration — showcase tuning and persistence.
//!
//! Settings are stored as TOML at
//! `$XDG_CONFIG_HOME/staff-showcase/config.toml` (default
//! `~/.config/staff-showcase/config.toml`).  Missing keys fall back to the
//! defaults; out-of-range values are clamped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ───────────────────────────────────────── defaults ──────────

pub const DEFAULT_SPEED: f64 = 45.0;
pub const DEFAULT_PLACEHOLDER_COUNT: usize = 8;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lane travel in cells per second.
    pub speed: f64,
    /// Skeleton cards shown while the roster is loading.
    pub placeholder_count: usize,
    /// Delay between animation frames.
    pub frame_interval_ms: u64,
    /// Public base URL that relative photo paths are joined onto.
    pub photo_base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            placeholder_count: DEFAULT_PLACEHOLDER_COUNT,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            photo_base_url: None,
        }
    }
}

impl AppConfig {
    /// Keep every value inside a range that produces a watchable lane.
    pub fn clamped(mut self) -> Self {
        self.speed = if self.speed.is_finite() {
            self.speed.clamp(1.0, 400.0)
        } else {
            DEFAULT_SPEED
        };
        self.placeholder_count = self.placeholder_count.clamp(1, 32);
        self.frame_interval_ms = self.frame_interval_ms.clamp(8, 100);
        self.photo_base_url = self
            .photo_base_url
            .take()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise()?)?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        match toml::from_str::<Self>(s) {
            Ok(config) => config.clamped(),
            Err(err) => {
                tracing::warn!(%err, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    fn serialise(&self) -> anyhow::Result<String> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!("# staff-showcase configuration\n\n{body}"))
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/staff-showcase/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("staff-showcase").join("config.toml")
}
