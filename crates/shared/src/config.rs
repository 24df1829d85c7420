//! Application configuration management.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};
use crate::types::{DateMode, TierModes};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Locale configuration.
    pub locale: LocaleConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Toolbar instance configuration.
    pub toolbar: ToolbarConfig,
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// IANA time zone used for "today" and day boundaries.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl LocaleConfig {
    /// Parses the configured time zone.
    pub fn tz(&self) -> FilterResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| FilterError::InvalidTimezone(self.timezone.clone()))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "filterbar=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Hierarchical data-filter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFilterConfig {
    /// Selection mode per tier.
    #[serde(default)]
    pub selection_modes: TierModes,
}

/// Date-filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilterConfig {
    /// Active date mode.
    pub mode: DateMode,
}

/// Per-instance toolbar configuration, immutable for the toolbar's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarConfig {
    /// Whether the hierarchical selectors are shown at all.
    #[serde(default = "default_show_data_filters")]
    pub show_data_filters: bool,
    /// Catalog key under which the top-tier items are listed.
    #[serde(default = "default_root_key")]
    pub root_key: String,
    /// Hierarchical selectors, if present on this toolbar.
    #[serde(default)]
    pub data_filter: Option<DataFilterConfig>,
    /// Date selector, if present on this toolbar.
    #[serde(default)]
    pub date_filter: Option<DateFilterConfig>,
    /// Routes on which the quarter picker is hidden.
    #[serde(default)]
    pub hide_quarter_on: Vec<String>,
}

fn default_show_data_filters() -> bool {
    true
}

fn default_root_key() -> String {
    "root".to_string()
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            show_data_filters: default_show_data_filters(),
            root_key: default_root_key(),
            data_filter: None,
            date_filter: None,
            hide_quarter_on: Vec::new(),
        }
    }
}

impl ToolbarConfig {
    /// Returns the configured tier modes, all `none` without a data filter.
    #[must_use]
    pub fn tier_modes(&self) -> TierModes {
        self.data_filter
            .map(|data| data.selection_modes)
            .unwrap_or_default()
    }

    /// Returns the configured date mode, if any.
    #[must_use]
    pub fn date_mode(&self) -> Option<DateMode> {
        self.date_filter.map(|date| date.mode)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> FilterResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FILTERBAR").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Loads configuration from an explicit file, then the environment.
    pub fn load_from(path: &Path) -> FilterResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FILTERBAR").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parses configuration from a TOML document.
    pub fn from_toml_str(toml: &str) -> FilterResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
