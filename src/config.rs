//! Client configuration.
//!
//! Settings are read from TOML. Lookup order: an explicit path, then
//! `<config_dir>/snapview/config.toml`, then built-in defaults. Every section
//! is optional so a config file only needs the keys it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Which snapshot family the client renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Arcade game frame pushed by the server
    #[default]
    Game,
    /// Home-network device dashboard
    Devices,
    /// System metrics dashboard
    System,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Game, ViewKind::Devices, ViewKind::System];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Game => "game",
            ViewKind::Devices => "devices",
            ViewKind::System => "system",
        }
    }

    /// Human-facing title used by window headers.
    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Game => "Space Invaders",
            ViewKind::Devices => "Network Devices",
            ViewKind::System => "System Monitor",
        }
    }

    /// Source used when the configuration does not name one.
    pub fn default_source(self) -> SourceConfig {
        match self {
            ViewKind::Game => SourceConfig::Push {
                url: "ws://127.0.0.1:5000/ws".to_string(),
                event: default_snapshot_event(),
            },
            ViewKind::Devices => SourceConfig::Http {
                url: "http://127.0.0.1:5000/api/devices".to_string(),
            },
            ViewKind::System => SourceConfig::Http {
                url: "http://127.0.0.1:5000/api/stats".to_string(),
            },
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "game" => Ok(ViewKind::Game),
            "devices" => Ok(ViewKind::Devices),
            "system" => Ok(ViewKind::System),
            other => Err(format!("unknown view '{}': expected game, devices or system", other)),
        }
    }
}

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// WebSocket push channel carrying named events
    Push {
        url: String,
        #[serde(default = "default_snapshot_event")]
        event: String,
    },
    /// Periodic GET returning one snapshot per request
    Http { url: String },
    /// JSON (or brotli-compressed JSON) file re-read on every poll
    File { path: PathBuf },
    /// Synthetic snapshots generated locally
    Demo {
        #[serde(default = "default_demo_seed")]
        seed: u64,
    },
}

impl SourceConfig {
    /// Short description for logs and the status bar.
    pub fn describe(&self) -> String {
        match self {
            SourceConfig::Push { url, event } => format!("push {} ({})", url, event),
            SourceConfig::Http { url } => format!("poll {}", url),
            SourceConfig::File { path } => format!("file {}", path.display()),
            SourceConfig::Demo { seed } => format!("demo (seed {})", seed),
        }
    }
}

fn default_snapshot_event() -> String {
    "game_state".to_string()
}

fn default_demo_seed() -> u64 {
    42
}

/// Render and data cadence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Data cadence for polled sources
    pub poll_interval_ms: u64,
    /// Render cadence for dashboards (the game repaints continuously)
    pub render_interval_ms: u64,
    /// Delay before the push channel reconnects
    pub reconnect_delay_ms: u64,
    /// Socket read timeout used by the push worker between outbound drains
    pub read_timeout_ms: u64,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
            render_interval_ms: 2000,
            reconnect_delay_ms: 1000,
            read_timeout_ms: 50,
        }
    }
}

impl CadenceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms.max(1))
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.max(1))
    }
}

/// Logical size of the game's drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub view: ViewKind,
    /// Explicit source; `None` means the view's default source
    #[serde(default)]
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub cadence: CadenceConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Loads configuration following the documented lookup order.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `<config_dir>/snapview/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("snapview").join("config.toml"))
    }

    /// The configured source, or the default for the selected view.
    pub fn effective_source(&self) -> SourceConfig {
        self.source.clone().unwrap_or_else(|| self.view.default_source())
    }
}
