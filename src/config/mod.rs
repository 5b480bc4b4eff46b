use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_VERSION: &str = "1";
pub const DEFAULT_API_BASE_URL: &str = "https://api.trello.com";

/// Connection settings shared by the card trigger and every card task.
///
/// Field names follow the declarative definitions of the host
/// (`apiKey`, `apiToken`, `apiVersion`, `apiBaseUrl`).
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// Trello API key
    pub api_key: String,
    /// Trello API token
    pub api_token: String,
    /// API version path segment (default "1")
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// API base URL (default "https://api.trello.com")
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl ConnectionConfig {
    /// Connection against the public Trello API with default version.
    pub fn new(api_key: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_token: api_token.into(),
            api_version: default_api_version(),
            api_base_url: default_api_base_url(),
        }
    }

    /// Same credentials, different base URL (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Value of the `Authorization` header sent on every request.
    pub fn authorization_header(&self) -> String {
        format!(
            "OAuth oauth_consumer_key=\"{}\", oauth_token=\"{}\"",
            self.api_key, self.api_token
        )
    }

    /// `{base}/{version}/{endpoint}`
    pub fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.api_version,
            endpoint
        )
    }
}

// Keep credentials out of logs.
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("api_key", &"<redacted>")
            .field("api_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Parse a TOML document into any deserializable definition.
pub fn from_toml_str<T: for<'de> Deserialize<'de>>(contents: &str) -> Result<T> {
    toml::from_str(contents).context("Failed to parse TOML configuration")
}

/// Load a TOML file into any deserializable definition.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path))?;
    from_toml_str(&contents).with_context(|| format!("Invalid configuration in {}", path))
}
