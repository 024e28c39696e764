//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ESPEAK_BIN: &str = "espeak-ng";
#[cfg(feature = "reverse-lookup")]
pub const DEFAULT_API_VERSION: &str = "2023-05-15";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number, got {0:?}")]
    InvalidPort(String),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub espeak_bin: PathBuf,
    #[cfg(feature = "reverse-lookup")]
    pub upstream: UpstreamConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            espeak_bin: get("ESPEAK_BIN")
                .unwrap_or_else(|| DEFAULT_ESPEAK_BIN.to_string())
                .into(),
            #[cfg(feature = "reverse-lookup")]
            upstream: UpstreamConfig {
                endpoint: get("AZURE_OPENAI_ENDPOINT"),
                api_key: get("AZURE_OPENAI_API_KEY"),
                deployment: get("AZURE_OPENAI_ENGINE"),
                api_version: get("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            },
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

/// Settings for the Azure OpenAI chat-completion deployment.
#[cfg(feature = "reverse-lookup")]
#[derive(Debug, Clone, Default)]
pub struct UpstreamConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub deployment: Option<String>,
    pub api_version: String,
}

#[cfg(feature = "reverse-lookup")]
impl UpstreamConfig {
    /// Environment variable names of the required settings that are unset.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.endpoint.is_none() {
            missing.push("AZURE_OPENAI_ENDPOINT");
        }
        if self.api_key.is_none() {
            missing.push("AZURE_OPENAI_API_KEY");
        }
        if self.deployment.is_none() {
            missing.push("AZURE_OPENAI_ENGINE");
        }
        missing
    }

    pub fn is_configured(&self) -> bool {
        self.missing().is_empty()
    }

    /// The endpoint with any occurrence of the API key masked.
    pub fn redacted_endpoint(&self) -> String {
        let endpoint = self.endpoint.clone().unwrap_or_default();
        match &self.api_key {
            Some(key) => endpoint.replace(key.as_str(), "REDACTED"),
            None => endpoint,
        }
    }
}
