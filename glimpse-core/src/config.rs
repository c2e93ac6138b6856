//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Manages all user-editable settings for the live-search client. Loads and
//! saves settings as TOML from the proper cross-platform config path using
//! the [`directories`](https://docs.rs/directories) crate.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Robust defaulting if no config file exists
//! - Async load/save for smooth integration with Tokio
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save().await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

/// Search dispatch tuning. All values are fixed at startup; the dispatcher
/// never re-reads them per keystroke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint URL. The query text is sent as the `q` parameter.
    pub endpoint: String,

    /// Queries shorter than this many characters never hit the network.
    pub min_search_length: usize,

    /// Quiet time between the last keystroke and dispatch.
    #[serde(with = "humantime_serde")]
    pub query_delay: Duration,

    /// Per-request timeout. A timed-out request reports as a failure and
    /// renders the empty result state.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/search/json".to_string(),
            min_search_length: 2,
            query_delay: Duration::from_millis(200),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// User-visible text and behavior toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Dim placeholder shown while the search box is empty.
    pub placeholder_text: String,

    /// Message shown when a completed query matched nothing.
    pub no_results_text: String,

    /// Ask before opening a result link with the system handler.
    pub confirm_open: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder_text: "Search people, communities, content...".to_string(),
            no_results_text: "No results found.".to_string(),
            confirm_open: false,
        }
    }
}

/// File logging settings, consumed once by `Logger::init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,

    pub log_file_prefix: String,

    /// Default level filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: "glimpse".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from TOML file at the XDG-compliant app config dir, or
    /// returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/Glimpse/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(&path).await?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save().await?;

            Ok(default_config)
        }
    }

    /// Saves config to TOML file at the XDG-compliant app config dir.
    pub async fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;

        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(&path, toml_str).await?;

        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "glimpse", "Glimpse")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_observed_widget_tuning() {
        let cfg = Config::default();
        assert_eq!(cfg.search.min_search_length, 2);
        assert_eq!(cfg.search.query_delay, Duration::from_millis(200));
        assert!(!cfg.ui.no_results_text.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_missing_sections() {
        let cfg: Config = toml::from_str(
            r#"
            [search]
            endpoint = "https://example.net/search/json"
            min_search_length = 3
            query_delay = "150ms"
            request_timeout = "5s"
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(cfg.search.min_search_length, 3);
        assert_eq!(cfg.search.query_delay, Duration::from_millis(150));
        // Missing [ui] and [logging] sections fall back to defaults.
        assert!(!cfg.ui.confirm_open);
        assert_eq!(cfg.logging.log_level, "info");
    }
}
