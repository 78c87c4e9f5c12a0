use payloads::APIClient;
use serde_json::Value;
use std::sync::Arc;

use super::{FetchHook, MutationHook, use_fetch, use_mutation};
use crate::ErrorReporter;

/// Global app configuration as the backend stores it.
pub async fn use_app_config(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> FetchHook<(), Value> {
    use_fetch(
        "app config",
        (),
        |_: &()| true,
        move |_: ()| {
            let client = client.clone();
            async move { client.app_config().await }
        },
        reporter,
    )
    .await
}

/// Replace the app configuration. Refetch `use_app_config` afterwards to
/// see what the server kept.
pub fn use_update_app_config(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> MutationHook<Value> {
    use_mutation(
        "update app config",
        move |config: Value| {
            let client = client.clone();
            async move { client.update_app_config(&config).await }
        },
        reporter,
    )
}
