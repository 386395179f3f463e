use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.sarvam.ai/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SARVAM_API_KEY environment variable is required")]
    MissingCredential,

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// How the server talks to its MCP host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// JSON-RPC over `POST /mcp`
    Http,
}

#[derive(Clone)]
pub struct Config {
    // Sarvam
    pub sarvam_api_key: String,
    pub sarvam_api_url: String,
    pub request_timeout: Duration,

    // Server
    pub transport: Transport,
    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("sarvam_api_key", &"<redacted>")
            .field("sarvam_api_url", &self.sarvam_api_url)
            .field("request_timeout", &self.request_timeout)
            .field("transport", &self.transport)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        let sarvam_api_key = lookup("SARVAM_API_KEY").ok_or(ConfigError::MissingCredential)?;

        let mut sarvam_api_url =
            lookup("SARVAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !sarvam_api_url.ends_with('/') {
            sarvam_api_url.push('/');
        }

        let timeout_secs = match lookup("SARVAM_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "SARVAM_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let transport = match lookup("MCP_TRANSPORT") {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "stdio" => Transport::Stdio,
                "http" => Transport::Http,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "MCP_TRANSPORT",
                        value,
                    })
                }
            },
            None => Transport::Stdio,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            sarvam_api_key,
            sarvam_api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            transport,
            port,
        })
    }
}
