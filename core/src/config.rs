//! Deployment environments, credentials and environment-variable configuration.

use std::fmt;

use tracing::warn;

use crate::client::LockstepApi;
use crate::error::ApiError;

pub const SANDBOX_URL: &str = "https://api.sbx.lockstep.io/";
pub const PRODUCTION_URL: &str = "https://api.lockstep.io/";

/// Variables read by `LockstepApi::from_env`.
pub const ENV_ENVIRONMENT: &str = "LOCKSTEP_ENV";
pub const ENV_URL: &str = "LOCKSTEP_URL";
pub const ENV_API_KEY: &str = "LOCKSTEP_API_KEY";
pub const ENV_BEARER_TOKEN: &str = "LOCKSTEP_BEARER_TOKEN";
pub const ENV_APP_NAME: &str = "LOCKSTEP_APP_NAME";

/// A named deployment of the Lockstep Platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Map `sbx` / `prd` to an environment. Any other name, including typos
    /// and the empty string, selects production.
    pub fn from_name(name: &str) -> Self {
        match name {
            "sbx" => Environment::Sandbox,
            "prd" => Environment::Production,
            other => {
                warn!(environment = other, "unknown environment name, using production");
                Environment::Production
            }
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_URL,
            Environment::Production => PRODUCTION_URL,
        }
    }
}

/// How requests authenticate. Holding one enum rather than two optional
/// fields means a bearer token and an API key can never both be set.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credential {
    #[default]
    None,
    BearerToken(String),
    ApiKey(String),
}

impl Credential {
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Credential::BearerToken(token) => Some(token),
            _ => None,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        match self {
            Credential::ApiKey(key) => Some(key),
            _ => None,
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::None => f.write_str("None"),
            Credential::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
            Credential::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

impl LockstepApi {
    /// Build a client from `LOCKSTEP_*` environment variables.
    ///
    /// `LOCKSTEP_URL` takes precedence over `LOCKSTEP_ENV` (default `prd`).
    /// If both `LOCKSTEP_API_KEY` and `LOCKSTEP_BEARER_TOKEN` are set, the
    /// API key is used.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mut api = match var(ENV_URL) {
            Some(url) => Self::with_custom_environment(&url)?,
            None => Self::with_environment(var(ENV_ENVIRONMENT).as_deref().unwrap_or("prd")),
        };

        match (var(ENV_API_KEY), var(ENV_BEARER_TOKEN)) {
            (Some(key), token) => {
                if token.is_some() {
                    warn!("both {ENV_API_KEY} and {ENV_BEARER_TOKEN} are set, using the API key");
                }
                api.set_api_key(key);
            }
            (None, Some(token)) => {
                api.set_bearer_token(token);
            }
            (None, None) => {}
        }

        if let Some(name) = var(ENV_APP_NAME) {
            api.set_application_name(name);
        }
        Ok(api)
    }
}
