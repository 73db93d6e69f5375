use std::path::{Path, PathBuf};

use color_eyre::eyre::{OptionExt, Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};

use crate::ports::youtube::Visibility;
use crate::services::spotify::client::SpotifyApiCredentials;
use crate::services::transfer::{DEFAULT_DESCRIPTION, TransferOptions};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    spotify: SpotifyConfig,
    #[serde(default)]
    youtube: YoutubeConfig,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeConfig {
    /// Path to the OAuth client_secret.json downloaded from Google Cloud
    pub client_secrets_file: Option<String>,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            client_secrets_file: None,
            description: default_description(),
            visibility: Visibility::default(),
        }
    }
}

/// Values given on the command line (or through their environment variables).
/// Anything set here wins over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub client_secrets_file: Option<PathBuf>,
    pub visibility: Option<Visibility>,
}

const DEFAULT_CONFIG: &str = r#"[spotify]
# From https://developer.spotify.com/dashboard
client_id = ""
client_secret = ""

[youtube]
# OAuth client (Desktop app) from https://console.cloud.google.com/apis/credentials
client_secrets_file = "~/.config/youtify/client_secret.json"
description = "Playlist converted from Spotify"
# public, private or unlisted
visibility = "public"
"#;

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("youtify").join("config.toml"))
    }

    /// Load the default config file; everything may also come from the command line,
    /// so a missing file is not an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Write a commented template to the default location unless a config already exists.
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_eyre("No config directory found")?;
        if path.exists() {
            return Err(eyre!("Config file already exists at {}", path.display()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, DEFAULT_CONFIG)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(path)
    }

    /// Expand ~ to home directory
    fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(path)
    }

    pub fn spotify_credentials(&self, overrides: &Overrides) -> Result<SpotifyApiCredentials> {
        let client_id = pick(&overrides.client_id, &self.spotify.client_id)
            .ok_or_eyre("Missing Spotify client id: pass --client-id or set spotify.client_id")?;
        let client_secret = pick(&overrides.client_secret, &self.spotify.client_secret)
            .ok_or_eyre(
                "Missing Spotify client secret: pass --client-secret or set spotify.client_secret",
            )?;
        Ok(SpotifyApiCredentials::new(client_id, client_secret))
    }

    pub fn client_secrets_file(&self, overrides: &Overrides) -> Result<PathBuf> {
        if let Some(path) = &overrides.client_secrets_file {
            return Ok(path.clone());
        }
        self.youtube
            .client_secrets_file
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(Self::expand_path)
            .ok_or_eyre(
                "Missing YouTube client secrets file: pass --credentials-file or set youtube.client_secrets_file",
            )
    }

    pub fn transfer_options(&self, overrides: &Overrides) -> TransferOptions {
        TransferOptions {
            description: self.youtube.description.clone(),
            visibility: overrides.visibility.unwrap_or(self.youtube.visibility),
        }
    }
}

/// First non-blank value, command line before config file.
fn pick(preferred: &Option<String>, fallback: &Option<String>) -> Option<String> {
    [preferred, fallback]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .cloned()
}
