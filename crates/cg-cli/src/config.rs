//! Configuration loading and management.

use std::path::{Path, PathBuf};

use cg_core::{AccumulatorConfig, DEFAULT_HOME_LABEL, RelevanceWindowError};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Default travel relevance limit, in minutes.
const DEFAULT_TRAVEL_RELEVANCE_MINUTES: i64 = 120;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Location name treated as the subject's home.
    pub home_location: String,

    /// Longest LEAVE -> ENTER gap, in minutes, still credited as travel.
    pub travel_relevance_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_location: DEFAULT_HOME_LABEL.to_string(),
            travel_relevance_minutes: DEFAULT_TRAVEL_RELEVANCE_MINUTES,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, the user config file, `path`, then
    /// `CARETIME_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (CARETIME_*)
        figment = figment.merge(Env::prefixed("CARETIME_"));

        figment.extract()
    }

    /// Accumulator settings derived from this configuration.
    ///
    /// Fails when `travel_relevance_minutes` is negative or out of range.
    pub fn accumulator_config(&self) -> Result<AccumulatorConfig, RelevanceWindowError> {
        AccumulatorConfig::from_travel_relevance_minutes(self.travel_relevance_minutes)
    }
}

/// Returns the platform-specific config directory for caretime.
///
/// On Linux: `~/.config/caretime`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("caretime"))
}
