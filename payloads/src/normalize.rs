//! Turns whatever came back from the transport into either an envelope
//! whose `success` is true or a [`ClientError`] with a readable message.

use crate::transport::{RawResponse, TransportError};
use crate::{ClientError, Envelope};

pub const GENERIC_FAILURE: &str = "Something went wrong, Please try again!";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

pub fn unwrap(
    result: Result<RawResponse, TransportError>,
) -> Result<Envelope, ClientError> {
    let response = result.map_err(from_transport)?;
    let envelope: Envelope = serde_json::from_str(&response.body)
        .map_err(|e| ClientError::Decode(non_empty(e.to_string())))?;
    if !envelope.success {
        let message = envelope
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        return Err(ClientError::Rejected(message));
    }
    Ok(envelope)
}

fn from_transport(error: TransportError) -> ClientError {
    let fallback = non_empty(error.to_string());
    match error {
        TransportError::Unauthorized => ClientError::Unauthorized,
        TransportError::Status(status, body) => {
            ClientError::APIError(status, server_message(&body).unwrap_or(fallback))
        }
        TransportError::Network(_) | TransportError::InvalidHeader(_) => {
            ClientError::Network(fallback)
        }
    }
}

/// The `message` field of a JSON error body, if there is one.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|message| message.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}
