//! Configuration for the articles client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/quire/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Command-line flags are applied on top by `main`.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;


pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the articles server listens by default
pub const DEFAULT_API_URL: &str = "http://localhost:9000/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_THEME: &str = "dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the articles API (no trailing slash needed)
    pub api_url: String,

    /// File holding the persisted session token
    pub storage_path: PathBuf,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Drop article lists that resolve after a newer list or a mutation
    pub discard_stale_lists: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_path: default_storage_path(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: DEFAULT_THEME.to_string(),
            discard_stale_lists: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// `<data_dir>/quire/storage.json`, or the working directory if the platform
/// has no data dir
fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("quire").join("storage.json"))
        .unwrap_or_else(|| PathBuf::from("./quire-storage.json"))
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub storage_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,
    pub discard_stale_lists: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/quire/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("quire").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `quire config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("QUIRE_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Session file: env > file > default
        let storage_path = env("QUIRE_STORAGE")
            .or(file.storage_path)
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        // Timeout: env > file > default (unparseable env values are ignored)
        let request_timeout_secs = env("QUIRE_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .or(file.request_timeout_secs)
            .unwrap_or(defaults.request_timeout_secs);

        // Theme: env > file > default
        let theme = env("QUIRE_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Stale list discard: file > default
        let discard_stale_lists = file
            .discard_stale_lists
            .unwrap_or(defaults.discard_stale_lists);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            storage_path,
            request_timeout_secs,
            theme,
            discard_stale_lists,
            logging,
        }
    }
}
