mod use_app_config;
mod use_dashboard_stats;
mod use_detail;
mod use_featured_products;
mod use_fetch;
mod use_mutation;
mod use_notifications;
mod use_orders;
mod use_query;
mod use_reports;
mod use_users;
mod use_verification_requests;

pub use use_app_config::{use_app_config, use_update_app_config};
pub use use_dashboard_stats::use_dashboard_stats;
pub use use_detail::{DetailHook, use_detail};
pub use use_featured_products::use_featured_products;
pub use use_fetch::{FetchHook, FetchHookState, use_fetch};
pub use use_mutation::{MutationHook, MutationState, use_mutation};
pub use use_notifications::{use_create_notification, use_notifications};
pub use use_orders::{use_order_detail, use_orders};
pub use use_query::{QueryHook, QueryState, use_query, use_resource_list};
pub use use_reports::{use_report_detail, use_report_status, use_reports};
pub use use_users::{use_block_user, use_unblock_user, use_user_detail, use_users};
pub use use_verification_requests::{
    use_badge_status, use_verification_detail, use_verification_requests,
};

use payloads::ClientError;

use crate::ErrorReporter;

/// Distinguishes "not fetched yet" from "fetched and empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}

/// Runs `settle` when dropped, so a request whose future is dropped before
/// it resolves still clears its loading state.
pub(crate) struct SettleOnDrop<F: FnOnce()> {
    settle: Option<F>,
}

impl<F: FnOnce()> SettleOnDrop<F> {
    pub(crate) fn new(settle: F) -> Self {
        Self {
            settle: Some(settle),
        }
    }
}

impl<F: FnOnce()> Drop for SettleOnDrop<F> {
    fn drop(&mut self) {
        if let Some(settle) = self.settle.take() {
            settle();
        }
    }
}

/// Hand a failed call to the reporter. Rejected sessions have already
/// been redirected to login, so they are only logged.
pub(crate) fn report_failure(
    reporter: &dyn ErrorReporter,
    context: &str,
    error: &ClientError,
) {
    if error.is_unauthorized() {
        tracing::debug!("{context}: session rejected");
        return;
    }
    tracing::debug!("{context}: {error}");
    reporter.report_error(&error.to_string());
}
