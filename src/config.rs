// Configuration: everything the run needs from the environment, gathered
// once into a plain struct and handed to the components that use it.

use crate::error::FatalError;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://sandbox.api.mailtrap.io";

/// Settings read from the environment (usually via a local `.env` file).
/// Missing values stay `None` here; each component decides whether a
/// missing value is fatal for it.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: Option<String>,
    pub inbox_id: Option<String>,
    pub default_from: Option<String>,
    pub default_to: Option<String>,
    pub api_base_url: String,
    /// No timeout unless `MAILTRAP_TIMEOUT_SECS` is set.
    pub timeout: Option<Duration>,
    /// Allow one extra attempt after a transport error or a 5xx response.
    pub retry_once: bool,
}

/// The pair of values the sandbox API needs for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub inbox_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_token: None,
            inbox_id: None,
            default_from: None,
            default_to: None,
            api_base_url: DEFAULT_API_URL.into(),
            timeout: None,
            retry_once: false,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, FatalError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FatalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty variable counts as unset.
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let timeout = match get("MAILTRAP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| FatalError::InvalidConfig {
                    name: "MAILTRAP_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let retry_once = match get("MAILTRAP_RETRY") {
            Some(raw) => parse_flag(&raw).ok_or(FatalError::InvalidConfig {
                name: "MAILTRAP_RETRY",
                value: raw,
            })?,
            None => false,
        };

        Ok(Config {
            api_token: get("MAILTRAP_API_TOKEN"),
            inbox_id: get("MAILTRAP_INBOX_ID"),
            default_from: get("EMAIL_FROM"),
            default_to: get("EMAIL_TO"),
            api_base_url: get("MAILTRAP_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.into()),
            timeout,
            retry_once,
        })
    }

    /// Both the API token and the inbox id, or `MissingCredentials`.
    pub fn credentials(&self) -> Result<Credentials, FatalError> {
        match (&self.api_token, &self.inbox_id) {
            (Some(api_token), Some(inbox_id)) => Ok(Credentials {
                api_token: api_token.clone(),
                inbox_id: inbox_id.clone(),
            }),
            _ => Err(FatalError::MissingCredentials),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
