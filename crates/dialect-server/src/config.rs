//! Server configuration loading from file and environment variables.

use dialect_gateway::{TelephonyConfig, VoiceApiConfig};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// External voice API settings.
    #[serde(default)]
    pub voice: VoiceApiConfig,

    /// External telephony API settings.
    #[serde(default)]
    pub telephony: TelephonyConfig,

    /// Demo client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "dialect_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Demo client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Directory with the browser client's static build output.
    #[serde(default = "default_client_dir")]
    pub dir: String,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_client_dir() -> String {
    "client/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dir: default_client_dir(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `DIALECT_HOST` overrides `server.host`
/// - `DIALECT_PORT` overrides `server.port`
/// - `DIALECT_LOG_LEVEL` overrides `logging.level`
/// - `DIALECT_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `DIALECT_VOICE_ENDPOINT` overrides `voice.endpoint`
/// - `DIALECT_VOICE_API_KEY` overrides `voice.api_key`
/// - `DIALECT_TELEPHONY_API_BASE` overrides `telephony.api_base`
/// - `DIALECT_TELEPHONY_ACCOUNT_ID` overrides `telephony.account_id`
/// - `DIALECT_TELEPHONY_AUTH_TOKEN` overrides `telephony.auth_token`
/// - `DIALECT_TELEPHONY_FROM_NUMBER` overrides `telephony.from_number`
/// - `DIALECT_CLIENT_DIR` overrides `client.dir`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("DIALECT_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("DIALECT_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(level) = std::env::var("DIALECT_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("DIALECT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(endpoint) = std::env::var("DIALECT_VOICE_ENDPOINT") {
        config.voice.endpoint = endpoint;
    }
    if let Ok(api_key) = std::env::var("DIALECT_VOICE_API_KEY") {
        config.voice.api_key = api_key;
    }
    if let Ok(api_base) = std::env::var("DIALECT_TELEPHONY_API_BASE") {
        config.telephony.api_base = api_base;
    }
    if let Ok(account_id) = std::env::var("DIALECT_TELEPHONY_ACCOUNT_ID") {
        config.telephony.account_id = account_id;
    }
    if let Ok(auth_token) = std::env::var("DIALECT_TELEPHONY_AUTH_TOKEN") {
        config.telephony.auth_token = auth_token;
    }
    if let Ok(from_number) = std::env::var("DIALECT_TELEPHONY_FROM_NUMBER") {
        config.telephony.from_number = from_number;
    }
    if let Ok(dir) = std::env::var("DIALECT_CLIENT_DIR") {
        config.client.dir = dir;
    }

    Ok(config)
}
