use payloads::APIClient;
use payloads::responses::DashboardStats;
use std::sync::Arc;

use super::{FetchHook, use_fetch};
use crate::ErrorReporter;

pub async fn use_dashboard_stats(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> FetchHook<(), DashboardStats> {
    use_fetch(
        "dashboard stats",
        (),
        |_: &()| true,
        move |_: ()| {
            let client = client.clone();
            async move { client.dashboard_stats().await }
        },
        reporter,
    )
    .await
}
