use serde::Deserialize;
use std::{fs, path::Path};
use toml;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigLoadingError {
    #[error("Failed to read the config ({path}): {reason}")]
    FailedToReadConfig { path: String, reason: String },

    #[error("Failed to parse the config: {0}")]
    FailedToParseConfig(#[from] toml::de::Error),

    #[error("Endpoint '{0}' must start with http:// or https://")]
    InvalidEndpoint(String)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the CD resource, e.g. `http://localhost:8000/api/v1/musics/`.
    pub music_endpoint: String,
    /// Base URL of the auth resource, e.g. `http://localhost:8000/api/v1/auth/`.
    pub auth_endpoint: String,
    /// Where anonymous users can register an account.
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ApiConfig {
    pub fn new<S>(music_endpoint: S, auth_endpoint: S) -> Result<Self, ConfigLoadingError>
    where S: Into<String>
    {
        let config = Self {
            music_endpoint: music_endpoint.into(),
            auth_endpoint: auth_endpoint.into(),
            website: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS
        };

        config.normalized()
    }

    /// Checks the scheme and makes sure both endpoints end with a slash,
    /// since resource paths are appended to them.
    fn normalized(mut self) -> Result<Self, ConfigLoadingError> {
        for endpoint in [&mut self.music_endpoint, &mut self.auth_endpoint] {
            let trimmed = endpoint.trim();
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigLoadingError::InvalidEndpoint(trimmed.to_string()));
            }

            let mut normalized = trimmed.to_string();
            if !normalized.ends_with('/') { normalized.push('/'); }
            *endpoint = normalized;
        }

        Ok(self)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadingError> {
        let config_str = fs::read_to_string(path)
            .map_err(|err| ConfigLoadingError::FailedToReadConfig { path: path.display().to_string(), reason: err.to_string() })?;

        Self::from_toml_str(&config_str, |name| std::env::var(name).ok())
    }

    /// Parses the config and applies the `MUSIC_ENDPOINT`, `AUTH_ENDPOINT`
    /// and `MUSIC_WEBSITE` overrides found through `env`.
    pub fn from_toml_str<F>(config_str: &str, env: F) -> Result<Self, ConfigLoadingError>
    where F: Fn(&str) -> Option<String>
    {
        let mut config: Config = toml::from_str(config_str)?;

        if let Some(music_endpoint) = env("MUSIC_ENDPOINT") {
            config.api.music_endpoint = music_endpoint;
        }
        if let Some(auth_endpoint) = env("AUTH_ENDPOINT") {
            config.api.auth_endpoint = auth_endpoint;
        }
        if let Some(website) = env("MUSIC_WEBSITE") {
            config.api.website = Some(website);
        }

        config.api = config.api.normalized()?;

        Ok(config)
    }
}
