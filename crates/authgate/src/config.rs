//! Client configuration.
//!
//! ```text
//! AUTHGATE_ENDPOINT       http://localhost:5000/api
//! AUTHGATE_TIMEOUT_SECS   30
//! AUTHGATE_SESSION_FILE   (unset → in-memory session)
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use authgate_session::{
    FileSessionStore, MemorySessionStore, SessionConfig, SessionError, SessionStore,
};
use authgate_transport::ReqwestTransport;

use crate::{ApiClient, AuthgateError};

pub const ENDPOINT_VAR: &str = "AUTHGATE_ENDPOINT";
pub const TIMEOUT_VAR: &str = "AUTHGATE_TIMEOUT_SECS";
pub const SESSION_FILE_VAR: &str = "AUTHGATE_SESSION_FILE";

const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from building or validating a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid timeout {value:?}: expected a positive number of seconds")]
    InvalidTimeout { value: String },
}

/// Everything needed to stand up an [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every API path is appended to.
    pub endpoint: String,

    /// Per-request timeout, connect included.
    pub timeout: Duration,

    /// Where the session jar lives. `None` keeps the session in memory.
    pub session_file: Option<PathBuf>,

    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: None,
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Reads the `AUTHGATE_*` variables from the process environment.
    ///
    /// # Errors
    /// See [`ClientConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from `lookup`, falling back to the defaults for
    /// anything it doesn't provide. Empty values count as unset.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the endpoint isn't an http(s) URL or the
    /// timeout isn't a positive integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(endpoint) = get(ENDPOINT_VAR) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = get(SESSION_FILE_VAR) {
            config.session_file = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`ConfigError`] if the endpoint isn't an absolute http(s)
    /// URL or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let url = url::Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".into()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: "0".into(),
            });
        }
        Ok(())
    }

    /// Opens the configured session backend: the jar file when one is set,
    /// otherwise a fresh in-memory store.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the jar file can't be opened.
    pub fn open_session_store(&self) -> Result<Arc<dyn SessionStore>, SessionError> {
        match &self.session_file {
            Some(path) => Ok(Arc::new(FileSessionStore::open(
                path.clone(),
                self.session.clone(),
            )?)),
            None => Ok(Arc::new(MemorySessionStore::new())),
        }
    }

    /// Validates the config and wires up a reqwest-backed client with the
    /// configured session store.
    ///
    /// # Errors
    /// Any [`ConfigError`], [`SessionError`], or failure to build the HTTP
    /// client.
    pub fn build_client(
        &self,
    ) -> Result<ApiClient<ReqwestTransport, Arc<dyn SessionStore>>, AuthgateError> {
        self.validate()?;
        let transport = ReqwestTransport::new(self.timeout)?;
        let store = self.open_session_store()?;

        tracing::debug!(
            endpoint = %self.endpoint,
            timeout_secs = self.timeout.as_secs(),
            persistent = self.session_file.is_some(),
            "client configured"
        );
        Ok(ApiClient::new(&self.endpoint, transport, store))
    }
}
