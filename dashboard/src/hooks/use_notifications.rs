use payloads::requests::CreateNotification;
use payloads::responses::Notification;
use payloads::{APIClient, QueryParameters, endpoints};
use std::sync::Arc;

use super::{MutationHook, QueryHook, use_mutation, use_resource_list};
use crate::ErrorReporter;

/// Push notifications sent so far, newest first as the server orders them.
pub async fn use_notifications(
    client: Arc<APIClient>,
    params: QueryParameters,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<Notification> {
    use_resource_list(client, endpoints::NOTIFICATIONS, params, reporter).await
}

/// Send a notification now, or schedule it when `schedule_for` is set.
pub fn use_create_notification(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> MutationHook<CreateNotification> {
    use_mutation(
        "send notification",
        move |details: CreateNotification| {
            let client = client.clone();
            async move { client.create_notification(&details).await }
        },
        reporter,
    )
}
