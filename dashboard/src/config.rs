use payloads::session::{
    FileTokenStore, LOGIN_ROUTE, MemoryTokenStore, Navigator, Session,
    TokenStore,
};
use payloads::transport::{Transport, TransportConfig, TransportError};
use payloads::{APIClient, DEFAULT_PAGE_SIZE, QueryParameters};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 100_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("Could not build the API transport: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub timeout: Duration,
    pub default_page_size: u32,
    /// Where the user is sent when the session is rejected.
    pub login_route: String,
    /// Persist the session token here; kept in memory when unset.
    pub token_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            default_page_size: DEFAULT_PAGE_SIZE,
            login_route: LOGIN_ROUTE.to_string(),
            token_file: None,
        }
    }
}

impl Config {
    /// Read configuration from the environment, after loading a `.env` file
    /// if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout = match var("API_TIMEOUT_MS") {
            Some(value) => Duration::from_millis(positive("API_TIMEOUT_MS", &value)?),
            None => defaults.timeout,
        };
        let default_page_size = match var("DEFAULT_PAGE_SIZE") {
            Some(value) => u32::try_from(positive("DEFAULT_PAGE_SIZE", &value)?)
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "DEFAULT_PAGE_SIZE",
                    value,
                })?,
            None => defaults.default_page_size,
        };

        Ok(Self {
            backend_url: var("BACKEND_URL").unwrap_or(defaults.backend_url),
            timeout,
            default_page_size,
            login_route: var("LOGIN_ROUTE").unwrap_or(defaults.login_route),
            token_file: var("TOKEN_FILE").map(PathBuf::from),
        })
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            ..TransportConfig::new(self.backend_url.clone())
        }
    }

    /// The token store selected by `TOKEN_FILE`.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        match &self.token_file {
            Some(path) => Arc::new(FileTokenStore::open(path)),
            None => Arc::new(MemoryTokenStore::default()),
        }
    }

    /// Assemble the API client: transport, session middleware and the given
    /// navigator for login redirects.
    pub fn build_client(
        &self,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<APIClient, ConfigError> {
        let session =
            Session::new(tokens, navigator).login_route(self.login_route.clone());
        let transport = Transport::new(&self.transport_config(), session)?;
        Ok(APIClient::new(transport))
    }

    /// First page of the configured size, no search, no filters.
    pub fn default_query(&self) -> QueryParameters {
        QueryParameters::new(1, self.default_page_size)
    }
}

fn positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}
