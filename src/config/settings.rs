//! Application settings loaded from config.toml
//!
//! Every section is optional; a missing file yields the defaults. Environment
//! variables (usually from `.env`) override the file where noted.

use crate::core::ranking::DEFAULT_LEADERBOARD_SIZE;
use crate::core::store::StoreOptions;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable carrying the platform light/dark preference.
pub const THEME_ENV_VAR: &str = "IDEA_BOARD_THEME";

/// Structure of the whole config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where state is persisted
    pub storage: StorageConfig,
    /// Theme fallback used before the user ever toggles
    pub appearance: AppearanceConfig,
    /// Leaderboard presentation
    pub leaderboard: LeaderboardConfig,
    /// Voting rules
    pub voting: VotingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `SQLite` URL; `DATABASE_URL` overrides it
    pub database_url: Option<String>,
}

/// Light or dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Ambient platform preference; `IDEA_BOARD_THEME` overrides it
    pub system_theme: Option<ThemePreference>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Number of entries per leaderboard
    pub size: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VotingConfig {
    /// Refuse votes for ids that match no idea instead of recording them
    pub strict: bool,
}

impl AppConfig {
    /// Parses config.toml contents.
    ///
    /// # Errors
    /// Returns `Error::Config` if the TOML is invalid or has the wrong shape.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {e}")))
    }

    /// The ambient theme preference, with `IDEA_BOARD_THEME` taking precedence
    /// over the file. Unrecognised values in the environment are ignored.
    #[must_use]
    pub fn system_theme(&self) -> Option<ThemePreference> {
        self.theme_with_override(std::env::var(THEME_ENV_VAR).ok().as_deref())
    }

    /// Options for constructing an [`crate::core::store::IdeaStore`].
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        self.options_for_theme(self.system_theme())
    }

    fn theme_with_override(&self, env_value: Option<&str>) -> Option<ThemePreference> {
        env_value
            .and_then(ThemePreference::parse)
            .or(self.appearance.system_theme)
    }

    fn options_for_theme(&self, theme: Option<ThemePreference>) -> StoreOptions {
        StoreOptions {
            system_prefers_dark: theme.map(|t| t == ThemePreference::Dark),
            strict_votes: self.voting.strict,
        }
    }
}

/// Loads settings from `path`, falling back to defaults if the file doesn't exist.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be read or parsed.
pub fn load_app_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        info!("No config file at {:?}, using defaults", path_ref);
        return Ok(AppConfig::default());
    }

    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {path_ref:?}: {e}")))?;
    AppConfig::from_toml(&contents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [storage]
            database_url = "sqlite://ideas.sqlite?mode=rwc"

            [appearance]
            system_theme = "dark"

            [leaderboard]
            size = 10

            [voting]
            strict = true
        "#;

        let config = AppConfig::from_toml(toml_str).unwrap();
        assert_eq!(
            config.storage.database_url.as_deref(),
            Some("sqlite://ideas.sqlite?mode=rwc")
        );
        assert_eq!(config.appearance.system_theme, Some(ThemePreference::Dark));
        assert_eq!(config.leaderboard.size, 10);
        assert!(config.voting.strict);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.storage.database_url.is_none());
        assert!(config.appearance.system_theme.is_none());
        assert_eq!(config.leaderboard.size, DEFAULT_LEADERBOARD_SIZE);
        assert!(!config.voting.strict);
    }

    #[test]
    fn test_invalid_config_is_a_config_error() {
        let err = AppConfig::from_toml("[appearance]\nsystem_theme = \"purple\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_app_config("definitely/not/a/real/config.toml").unwrap();
        assert_eq!(config.leaderboard.size, DEFAULT_LEADERBOARD_SIZE);
    }

    #[test]
    fn test_theme_preference_parse() {
        assert_eq!(ThemePreference::parse(" Dark "), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::parse("light"), Some(ThemePreference::Light));
        assert_eq!(ThemePreference::parse("auto"), None);
    }

    #[test]
    fn test_env_theme_overrides_file() {
        let config = AppConfig::from_toml("[appearance]\nsystem_theme = \"light\"").unwrap();

        assert_eq!(
            config.theme_with_override(Some("dark")),
            Some(ThemePreference::Dark)
        );
        assert_eq!(config.theme_with_override(None), Some(ThemePreference::Light));
    }

    #[test]
    fn test_unrecognised_env_theme_is_ignored() {
        let config = AppConfig::from_toml("[appearance]\nsystem_theme = \"dark\"").unwrap();
        assert_eq!(
            config.theme_with_override(Some("sepia")),
            Some(ThemePreference::Dark)
        );

        let bare = AppConfig::default();
        assert_eq!(bare.theme_with_override(Some("sepia")), None);
    }

    #[test]
    fn test_store_options_carry_theme_and_strict_votes() {
        let config = AppConfig::from_toml("[voting]\nstrict = true").unwrap();

        let options = config.options_for_theme(Some(ThemePreference::Dark));
        assert_eq!(
            options,
            StoreOptions {
                system_prefers_dark: Some(true),
                strict_votes: true,
            }
        );

        let options = AppConfig::default().options_for_theme(None);
        assert_eq!(options, StoreOptions::default());
    }
}
