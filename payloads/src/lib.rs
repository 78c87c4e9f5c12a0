mod api_client;
pub mod endpoints;
pub mod normalize;
pub mod query;
pub mod requests;
pub mod responses;
pub mod session;
pub mod transport;

pub use api_client::{APIClient, ClientError};
pub use endpoints::{DetailEndpoint, ListEndpoint};
pub use query::{DEFAULT_PAGE_SIZE, Page, Pagination, QueryOverrides, QueryParameters};
pub use responses::Envelope;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An identifier as the backend hands it out. Most resources use numeric
/// ids, some use opaque strings; both are echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(untagged)]
pub enum RawId {
    #[display("{_0}")]
    Number(i64),
    #[display("{_0}")]
    Text(String),
}

impl RawId {
    /// An empty text id is treated the same as no id at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

macro_rules! entity_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
            )]
            #[serde(transparent)]
            pub struct $name(pub RawId);

            impl $name {
                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }
            }

            impl From<i64> for $name {
                fn from(id: i64) -> Self {
                    Self(RawId::Number(id))
                }
            }

            impl From<&str> for $name {
                fn from(id: &str) -> Self {
                    Self(RawId::Text(id.to_string()))
                }
            }

            impl From<String> for $name {
                fn from(id: String) -> Self {
                    Self(RawId::Text(id))
                }
            }
        )*
    };
}

entity_id!(
    /// A marketplace user.
    UserId,
    /// A rental order.
    OrderId,
    /// An abuse report filed by one user against another.
    ReportId,
    /// An identity verification (verified badge) request.
    VerificationId,
);
