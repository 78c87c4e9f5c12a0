pub mod mock;

use dashboard::{Config, ToastHandle, logs};
use payloads::session::{MemoryTokenStore, Navigator, TokenStore};
use payloads::{APIClient, ClientError};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";

/// Records login redirects instead of navigating.
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    redirects: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .lock()
            .map(|redirects| redirects.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        if let Ok(mut redirects) = self.redirects.lock() {
            redirects.push(path.to_string());
        }
    }
}

pub struct TestApp {
    pub server: MockServer,
    pub client: Arc<APIClient>,
    pub tokens: MemoryTokenStore,
    pub navigator: RecordingNavigator,
    pub toasts: ToastHandle,
}

impl TestApp {
    /// The toast stack, as the hooks' error reporter.
    pub fn reporter(&self) -> Arc<dyn dashboard::ErrorReporter> {
        Arc::new(self.toasts.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.tokens
            .token()
            .map(|token| token.expose_secret().to_string())
    }

    /// Every request the mock backend has seen so far.
    pub async fn requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Requests the mock backend has seen for one path.
    pub async fn requests_to(&self, path: &str) -> Vec<wiremock::Request> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.url.path() == path)
            .collect()
    }
}

/// Start a mock backend and a client logged in against it.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_token(Some(TEST_TOKEN)).await
}

pub async fn spawn_app_with_token(token: Option<&str>) -> TestApp {
    logs::init_logging("error");

    let server = MockServer::start().await;
    let tokens = match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::default(),
    };
    let navigator = RecordingNavigator::default();
    let config = Config {
        backend_url: server.uri(),
        ..Config::default()
    };
    let client = match config
        .build_client(Arc::new(tokens.clone()), Arc::new(navigator.clone()))
    {
        Ok(client) => client,
        Err(e) => panic!("failed to build the client: {e}"),
    };

    TestApp {
        server,
        client: Arc::new(client),
        tokens,
        navigator,
        toasts: ToastHandle::new(),
    }
}

/// A successful envelope around `data`.
pub fn ok_envelope(data: Value) -> Value {
    json!({ "success": true, "message": "OK", "data": data })
}

/// A rejected envelope with `message` as the reason.
pub fn failed_envelope(message: &str) -> Value {
    json!({ "success": false, "message": message, "data": null })
}

/// A list payload: `items` under `collection` plus pagination.
pub fn list_data(
    collection: &str,
    items: Vec<Value>,
    total: u64,
    total_pages: u64,
) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(collection.to_string(), Value::Array(items));
    data.insert(
        "pagination".to_string(),
        json!({ "total": total, "totalPages": total_pages }),
    );
    Value::Object(data)
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(ClientError::APIError(code, _)) => assert_eq!(code, expected),
        Err(other) => panic!("Expected APIError, got {other:?}"),
        Ok(_) => panic!("Expected APIError, got a success"),
    };
}

/// Assert that a call failed with exactly `message`.
pub fn assert_error_message<T>(result: Result<T, ClientError>, message: &str) {
    match result {
        Err(e) => assert_eq!(e.to_string(), message),
        Ok(_) => panic!("Expected an error with message {message:?}"),
    }
}
