use crate::transport::{ApiRequest, Transport};
use crate::{
    DetailEndpoint, Envelope, ListEndpoint, Page, QueryParameters, endpoints,
    normalize, requests, responses,
};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An API client for the marketplace admin backend.
pub struct APIClient {
    pub transport: Transport,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    async fn send(&self, request: ApiRequest) -> Result<Envelope, ClientError> {
        normalize::unwrap(self.transport.send(request).await)
    }

    async fn empty_get(&self, path: &str) -> Result<Envelope, ClientError> {
        self.send(ApiRequest::get(path)).await
    }

    async fn post(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Envelope, ClientError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    async fn patch(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Envelope, ClientError> {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    async fn put(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Envelope, ClientError> {
        self.send(ApiRequest::put(path).json(body)?).await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Fetch one page of a list endpoint.
    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &ListEndpoint,
        params: &QueryParameters,
    ) -> Result<Page<T>, ClientError> {
        let request =
            ApiRequest::get(endpoint.path).query(params.to_query_pairs());
        let envelope = self.send(request).await?;
        Ok(envelope.page(endpoint.collection, endpoint.pagination)?)
    }

    /// Fetch one entity by id. `Ok(None)` means the server answered
    /// successfully without the entity.
    pub async fn detail<T: DeserializeOwned>(
        &self,
        endpoint: &DetailEndpoint,
        id: &impl std::fmt::Display,
    ) -> Result<Option<T>, ClientError> {
        let envelope = self.empty_get(&endpoint.path_for(id)).await?;
        Ok(envelope.entity(endpoint.projection)?)
    }

    /// Headline counters for the dashboard landing screen.
    pub async fn dashboard_stats(
        &self,
    ) -> Result<responses::DashboardStats, ClientError> {
        let envelope = self.empty_get(endpoints::DASHBOARD_STATS).await?;
        Ok(envelope.entity(None)?.unwrap_or_default())
    }

    /// Global app configuration (feature switches, support contacts, ...).
    pub async fn app_config(&self) -> Result<serde_json::Value, ClientError> {
        let envelope = self.empty_get(endpoints::APP_CONFIG).await?;
        Ok(envelope.data)
    }

    pub async fn update_app_config(
        &self,
        config: &serde_json::Value,
    ) -> Result<Envelope, ClientError> {
        self.put(endpoints::APP_CONFIG, config).await
    }

    pub async fn block_user(
        &self,
        details: &requests::BlockUser,
    ) -> Result<Envelope, ClientError> {
        self.post(endpoints::BLOCK_USER, details).await
    }

    pub async fn unblock_user(
        &self,
        details: &requests::UnblockUser,
    ) -> Result<Envelope, ClientError> {
        self.post(endpoints::UNBLOCK_USER, details).await
    }

    /// Move a report to a new status.
    pub async fn change_report_status(
        &self,
        details: &requests::ReportStatusChange,
    ) -> Result<Envelope, ClientError> {
        let report_id = details
            .report_id
            .as_ref()
            .ok_or(ClientError::MissingTarget)?;
        self.patch(&endpoints::report_status(report_id), details)
            .await
    }

    /// Approve or reject a verified badge request.
    pub async fn change_badge_status(
        &self,
        details: &requests::BadgeStatusChange,
    ) -> Result<Envelope, ClientError> {
        let verification_id = details
            .verification_id
            .as_ref()
            .ok_or(ClientError::MissingTarget)?;
        self.patch(&endpoints::verify_user(verification_id), details)
            .await
    }

    /// Send (or schedule) a push notification to app users.
    pub async fn create_notification(
        &self,
        details: &requests::CreateNotification,
    ) -> Result<Envelope, ClientError> {
        self.post(endpoints::SEND_NOTIFICATION, details).await
    }
}

/// Every way a call can fail, each carrying a message fit for a toast.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-2xx response, with the server's message when it sent one.
    #[error("{1}")]
    APIError(StatusCode, String),
    /// The server answered but reported `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The session was rejected; the login redirect has already been
    /// requested.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    #[error("{0}")]
    Network(String),
    /// The response did not have the expected shape.
    #[error("{0}")]
    Decode(String),
    #[error("No target selected for this action")]
    MissingTarget,
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(format!("Malformed payload: {e}"))
    }
}

impl ClientError {
    /// 401s are handled by the session itself and are not reported again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
