//! The one HTTP client every call goes through.

use crate::session::Session;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Static settings applied to every request.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub default_headers: Vec<(String, String)>,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(100_000),
            default_headers: vec![(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )],
        }
    }
}

/// A request relative to the configured base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn json(
        mut self,
        body: &impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A 2xx response, body not yet interpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The session was rejected. The token has already been cleared and the
    /// login redirect requested.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    /// A non-2xx response other than 401, with the server's body.
    #[error("Request failed with status code {}", .0.as_u16())]
    Status(StatusCode, String),
    /// No response: connection failure or timeout.
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid header {0}")]
    InvalidHeader(String),
}

pub struct Transport {
    inner: reqwest::Client,
    base_url: String,
    session: Session,
}

impl Transport {
    pub fn new(
        config: &TransportConfig,
        session: Session,
    ) -> Result<Self, TransportError> {
        let headers = header_map(&config.default_headers)?;
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn send(
        &self,
        request: ApiRequest,
    ) -> Result<RawResponse, TransportError> {
        let url = self.format_url(&request.path);
        let mut builder = self
            .inner
            .request(request.method.clone(), &url)
            .headers(header_map(&request.headers)?);
        if let Some(authorization) = self.session.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, %url, "sending request");
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = %request.method, %url, "request failed: {e}");
                return Err(e.into());
            }
        };

        let status = response.status();
        // The session ends on the status alone; the body may never arrive.
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "unauthorized, ending session");
            self.session.end();
            return Err(TransportError::Unauthorized);
        }
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(%url, %status, "api error: {body}");
            return Err(TransportError::Status(status, body));
        }
        tracing::debug!(%url, %status, "received response");
        Ok(RawResponse { status, body })
    }
}

fn header_map(
    headers: &[(String, String)],
) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
