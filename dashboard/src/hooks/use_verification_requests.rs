use payloads::requests::BadgeStatusChange;
use payloads::responses::VerificationRequest;
use payloads::{APIClient, QueryParameters, VerificationId, endpoints};
use std::sync::Arc;

use super::use_detail::use_resource_detail;
use super::{DetailHook, MutationHook, QueryHook, use_mutation, use_resource_list};
use crate::ErrorReporter;

/// Pending verified-badge requests.
pub async fn use_verification_requests(
    client: Arc<APIClient>,
    params: QueryParameters,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<VerificationRequest> {
    use_resource_list(client, endpoints::VERIFICATION_REQUESTS, params, reporter)
        .await
}

/// The user behind one verification request.
pub async fn use_verification_detail(
    client: Arc<APIClient>,
    verification_id: Option<VerificationId>,
    reporter: Arc<dyn ErrorReporter>,
) -> DetailHook<VerificationId, VerificationRequest> {
    use_resource_detail(
        client,
        endpoints::VERIFICATION_REQUEST,
        verification_id,
        reporter,
    )
    .await
}

/// Approve or reject a badge request. Rejections need a reason.
pub fn use_badge_status(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> MutationHook<BadgeStatusChange> {
    use_mutation(
        "badge status",
        move |change: BadgeStatusChange| {
            let client = client.clone();
            async move { client.change_badge_status(&change).await }
        },
        reporter,
    )
}
