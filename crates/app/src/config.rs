use std::env;

pub const API_KEY_VAR: &str = "SETLOG_API_KEY";
pub const NAMESPACE_VAR: &str = "SETLOG_NAMESPACE";
pub const AUTH_TOKEN_VAR: &str = "SETLOG_AUTH_TOKEN";

/// Store credentials and scope, supplied via the environment. There is no
/// CLI surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    /// Scope/namespace identifier of the per-user collections.
    pub namespace: String,
    /// Custom sign-in token. Without one, sign-in falls back to an
    /// anonymous identity.
    pub auth_token: Option<String>,
}

impl Config {
    /// Read the configuration from the environment, honoring an optional
    /// `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Ok(Self {
            api_key: required(API_KEY_VAR)?,
            namespace: required(NAMESPACE_VAR)?,
            auth_token: optional(AUTH_TOKEN_VAR)?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match optional(name)? {
        Some(value) => Ok(value),
        None => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidUnicode(name)),
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {0} contains invalid unicode")]
    InvalidUnicode(&'static str),
}
