//! # Configuration Module
//!
//! This module handles runtime configuration for MoodTune: where the HTTP
//! server listens, how many songs a request may ask for, and which song
//! source backs recommendations.
//!
//! ## Resolution Order
//!
//! Later layers override earlier ones:
//!
//! 1. Built-in defaults ([`ServerConfig::default`])
//! 2. A JSON config file, either given explicitly or found at the
//!    platform-standard location:
//!    - Linux: `~/.config/moodtune/config.json`
//!    - macOS: `~/Library/Application Support/moodtune/config.json`
//!    - Windows: `%APPDATA%\moodtune\config.json`
//! 3. Environment: `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`
//! 4. Command-line flags (applied by `main`)
//!
//! Every field of the file is optional; missing fields keep their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_NUM_SONGS: usize = 5;
pub const MAX_NUM_SONGS: usize = 20;

/// Which [`SongSource`](crate::catalog::SongSource) answers recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CatalogBackend {
    /// Built-in curated catalog
    #[default]
    Static,
    /// Spotify Web API, falling back to the curated catalog
    Spotify,
}

/// Settings for the external catalog client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub api_base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            api_base_url: "https://api.spotify.com/v1".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Configuration for the HTTP server and recommendation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Songs returned when a request does not say
    pub default_num_songs: usize,
    /// Upper bound accepted from requests
    pub max_num_songs: usize,
    pub catalog: CatalogBackend,
    pub spotify: SpotifyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            default_num_songs: DEFAULT_NUM_SONGS,
            max_num_songs: MAX_NUM_SONGS,
            catalog: CatalogBackend::Static,
            spotify: SpotifyConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from defaults, the config file and environment.
    ///
    /// With `path` set, that file must exist. Without it, the standard
    /// location is used when present and silently skipped otherwise.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - An explicitly given file cannot be read
    /// - The file is not valid JSON for this structure
    /// - The resulting values fail [`ServerConfig::validate`]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match get_config_path() {
                Some(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Reads one JSON config file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file at {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Fills Spotify credentials from the environment when set.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup("SPOTIFY_CLIENT_ID").filter(|v| !v.is_empty()) {
            self.spotify.client_id = Some(id);
        }
        if let Some(secret) = lookup("SPOTIFY_CLIENT_SECRET").filter(|v| !v.is_empty()) {
            self.spotify.client_secret = Some(secret);
        }
    }

    /// Rejects values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port must be between 1 and 65535");
        }
        if self.max_num_songs == 0 {
            anyhow::bail!("max_num_songs must be at least 1");
        }
        if self.default_num_songs == 0 || self.default_num_songs > self.max_num_songs {
            anyhow::bail!(
                "default_num_songs must be between 1 and max_num_songs ({})",
                self.max_num_songs
            );
        }
        if self.spotify.timeout_secs == 0 {
            anyhow::bail!("spotify.timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// `host:port` for binding.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Returns the platform-appropriate config file path, if the platform has a
/// config directory at all.
///
/// The file itself is optional and this function does not create anything.
///
/// # Examples
///
/// ```no_run
/// use moodtune::config::get_config_path;
///
/// if let Some(path) = get_config_path() {
///     println!("Config location: {}", path.display());
/// }
/// ```
#[must_use]
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("moodtune").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 5001);
        assert_eq!(config.default_num_songs, 5);
        assert_eq!(config.max_num_songs, 20);
        assert_eq!(config.catalog, CatalogBackend::Static);
        assert_eq!(config.bind_address(), "0.0.0.0:5001");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 8080, "catalog": "spotify", "spotify": {{"timeout_secs": 3}}}}"#).unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog, CatalogBackend::Spotify);
        assert_eq!(config.spotify.timeout_secs, 3);
        assert_eq!(config.spotify.api_base_url, "https://api.spotify.com/v1");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ServerConfig::load(Some(&dir.path().join("absent.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let zero_port = ServerConfig { port: 0, ..ServerConfig::default() };
        assert!(zero_port.validate().is_err());

        let too_many = ServerConfig { default_num_songs: 21, ..ServerConfig::default() };
        assert!(too_many.validate().is_err());

        let no_max = ServerConfig { max_num_songs: 0, ..ServerConfig::default() };
        assert!(no_max.validate().is_err());
    }

    #[test]
    fn test_env_overrides_credentials() {
        let mut config = ServerConfig::default();
        config.apply_env_from(|key| match key {
            "SPOTIFY_CLIENT_ID" => Some("abc".to_string()),
            "SPOTIFY_CLIENT_SECRET" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.spotify.client_id.as_deref(), Some("abc"));
        assert_eq!(config.spotify.client_secret, None);
    }

    #[test]
    fn test_config_path_structure() {
        if let Some(path) = get_config_path() {
            assert!(path.ends_with("moodtune/config.json"));
        }
    }
}
