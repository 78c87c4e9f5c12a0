//! The session boundary: where the bearer token lives and how the client
//! sends the user back to the login screen.

use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub const LOGIN_ROUTE: &str = "/auth/login";

/// Durable storage for the session token.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<SecretString>;
    fn set_token(&self, token: SecretString);
    fn clear(&self);
}

/// Full-page navigation, requested by the client when the session ends.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Token storage that lives as long as the process.
#[derive(Default, Clone)]
pub struct MemoryTokenStore {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        store.set_token(SecretString::from(token.into()));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<SecretString> {
        let copy = |token: &Option<SecretString>| {
            token
                .as_ref()
                .map(|t| SecretString::from(t.expose_secret().to_string()))
        };
        match self.token.read() {
            Ok(guard) => copy(&*guard),
            Err(poisoned) => copy(&*poisoned.into_inner()),
        }
    }

    fn set_token(&self, token: SecretString) {
        match self.token.write() {
            Ok(mut guard) => *guard = Some(token),
            Err(poisoned) => *poisoned.into_inner() = Some(token),
        }
    }

    fn clear(&self) {
        match self.token.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

/// Token storage backed by a file, surviving restarts. The file holds the
/// raw token and nothing else.
#[derive(Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    cached: MemoryTokenStore,
}

impl FileTokenStore {
    /// Open the store, loading any token left by a previous run.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = MemoryTokenStore::default();
        match std::fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => {
                cached.set_token(SecretString::from(contents.trim().to_string()));
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!("could not read token file {}: {e}", path.display());
            }
        }
        Self { path, cached }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<SecretString> {
        self.cached.token()
    }

    fn set_token(&self, token: SecretString) {
        if let Err(e) = std::fs::write(&self.path, token.expose_secret()) {
            tracing::warn!(
                "could not persist token to {}: {e}",
                self.path.display()
            );
        }
        self.cached.set_token(token);
    }

    fn clear(&self) {
        self.cached.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    "could not remove token file {}: {e}",
                    self.path.display()
                );
            }
        }
    }
}

/// A navigator for headless use: the redirect is only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, path: &str) {
        tracing::info!("session ended, redirect to {path}");
    }
}

/// Token attachment and 401 handling, applied once when the transport is
/// built.
#[derive(Clone)]
pub struct Session {
    pub tokens: Arc<dyn TokenStore>,
    pub navigator: Arc<dyn Navigator>,
    pub login_route: String,
}

impl Session {
    pub fn new(
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            tokens,
            navigator,
            login_route: LOGIN_ROUTE.to_string(),
        }
    }

    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Value for the `Authorization` header, if a token is held.
    pub fn authorization(&self) -> Option<String> {
        self.tokens
            .token()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    /// Drop the token and send the user to the login screen.
    pub fn end(&self) {
        self.tokens.clear();
        self.navigator.redirect(&self.login_route);
    }
}
