//! Client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use pinecone_core::EndpointResolver;

use crate::error::{ClientError, ClientResult};

pub const ENV_ENVIRONMENT: &str = "PINECONE_ENVIRONMENT";
pub const ENV_PROJECT_ID: &str = "PINECONE_PROJECT_ID";
pub const ENV_API_KEY: &str = "PINECONE_API_KEY";
pub const ENV_BASE_URL: &str = "PINECONE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "PINECONE_TIMEOUT_SECS";

/// The secret sent in the `Api-Key` header. `Debug` never shows it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKey(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(SNIP)")
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: String,
    pub project_id: String,
    pub api_key: ApiKey,
    /// Serve every plane from this URL instead of the pinecone.io hosts.
    pub base_url: Option<String>,
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(environment: impl Into<String>, project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        ClientConfig {
            environment: environment.into(),
            project_id: project_id.into(),
            api_key: ApiKey::new(api_key),
            base_url: None,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `PINECONE_ENVIRONMENT`, `PINECONE_PROJECT_ID` and `PINECONE_API_KEY`
    /// (required) plus `PINECONE_BASE_URL` and `PINECONE_TIMEOUT_SECS` (optional).
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ClientError::Configuration(format!("{} is not set", key)))
        };

        let mut config = ClientConfig::new(required(ENV_ENVIRONMENT)?, required(ENV_PROJECT_ID)?, required(ENV_API_KEY)?);

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Configuration(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn resolver(&self) -> EndpointResolver {
        let resolver = EndpointResolver::new(self.environment.clone(), self.project_id.clone());
        match &self.base_url {
            Some(base_url) => resolver.with_base_url(base_url.clone()),
            None => resolver,
        }
    }
}
