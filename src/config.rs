use std::fmt;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Everything the VK side of the service needs. Loaded once, never mutated.
#[derive(Clone)]
pub struct VkConfig {
    pub group_id: i64,
    pub access_token: String,
    pub api_url: String,
    pub confirmation_code: String,
    pub send_method: String,
    pub api_version: String,
    pub request_timeout: Duration,
}

// access_token stays out of logs
impl fmt::Debug for VkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VkConfig")
            .field("group_id", &self.group_id)
            .field("access_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("confirmation_code", &self.confirmation_code)
            .field("send_method", &self.send_method)
            .field("api_version", &self.api_version)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub vk: VkConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            match lookup(var) {
                Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
                _ => Err(ConfigError::Missing(var)),
            }
        };

        let group_id = parse_var("VK_GROUP_ID", required("VK_GROUP_ID")?)?;
        let access_token = required("VK_ACCESS_TOKEN")?;
        let api_url = required("VK_API_URL")?;
        let confirmation_code = required("VK_CONFIRMATION_CODE")?;
        let send_method = required("VK_SEND_METHOD")?;
        let api_version = required("VK_API_VERSION")?;

        let request_timeout = match lookup("VK_REQUEST_TIMEOUT_SECS") {
            Some(v) => match parse_var::<u64>("VK_REQUEST_TIMEOUT_SECS", v.clone())? {
                // a zero timeout would fail every send
                0 => {
                    return Err(ConfigError::Invalid {
                        var: "VK_REQUEST_TIMEOUT_SECS",
                        value: v,
                    })
                }
                secs => Duration::from_secs(secs),
            },
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(v) => parse_var("PORT", v)?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            host,
            port,
            vk: VkConfig {
                group_id,
                access_token,
                api_url,
                confirmation_code,
                send_method,
                api_version,
                request_timeout,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { var, value })
}
