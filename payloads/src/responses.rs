use crate::{Page, Pagination};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The wrapper every backend response is sent in.
///
/// When `success` is false, `data` must be treated as absent and `message`
/// carries the reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Read `data.<collection>` and `data.<pagination>` into a page. A
    /// missing collection is an empty page; missing totals are zero.
    pub fn page<T: DeserializeOwned>(
        &self,
        collection: &str,
        pagination: &str,
    ) -> Result<Page<T>, serde_json::Error> {
        let items = match self.data.get(collection) {
            Some(Value::Null) | None => Vec::new(),
            Some(items) => Vec::<T>::deserialize(items)?,
        };
        let pagination = match self.data.get(pagination) {
            Some(Value::Null) | None => Pagination::default(),
            Some(pagination) => Pagination::deserialize(pagination)?,
        };
        Ok(Page { items, pagination })
    }

    /// Read the payload, or a single field of it when `projection` is set.
    /// Returns `None` when the selected value is absent or null.
    pub fn entity<T: DeserializeOwned>(
        &self,
        projection: Option<&str>,
    ) -> Result<Option<T>, serde_json::Error> {
        let value = match projection {
            Some(field) => self.data.get(field),
            None => Some(&self.data),
        };
        match value {
            Some(Value::Null) | None => Ok(None),
            Some(value) => T::deserialize(value).map(Some),
        }
    }
}

/// Headline numbers for the dashboard landing screen. The backend may add
/// fields at any time, so everything is optional and unknown keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default)]
    pub total_orders: Option<u64>,
    #[serde(default)]
    pub total_reports: Option<u64>,
    #[serde(default)]
    pub total_revenue: Option<f64>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

// Entities are shown as the backend sends them; the dashboard only reads
// ids and a few display fields out of them.
pub type User = Value;
pub type UserActivity = Value;
pub type Order = Value;
pub type Report = Value;
pub type Notification = Value;
pub type VerificationRequest = Value;
pub type Purchase = Value;
