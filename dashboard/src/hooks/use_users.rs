use payloads::requests::{BlockUser, UnblockUser};
use payloads::responses::{User, UserActivity};
use payloads::{APIClient, QueryParameters, UserId, endpoints};
use std::sync::Arc;

use super::use_detail::use_resource_detail;
use super::{DetailHook, MutationHook, QueryHook, use_mutation, use_resource_list};
use crate::ErrorReporter;

/// Marketplace users, searchable by name or email.
pub async fn use_users(
    client: Arc<APIClient>,
    params: QueryParameters,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<User> {
    use_resource_list(client, endpoints::USERS, params, reporter).await
}

/// Activity overview of one user.
pub async fn use_user_detail(
    client: Arc<APIClient>,
    user_id: Option<UserId>,
    reporter: Arc<dyn ErrorReporter>,
) -> DetailHook<UserId, UserActivity> {
    use_resource_detail(client, endpoints::USER_ACTIVITY, user_id, reporter)
        .await
}

pub fn use_block_user(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> MutationHook<BlockUser> {
    use_mutation(
        "block user",
        move |details: BlockUser| {
            let client = client.clone();
            async move { client.block_user(&details).await }
        },
        reporter,
    )
}

pub fn use_unblock_user(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> MutationHook<UnblockUser> {
    use_mutation(
        "unblock user",
        move |details: UnblockUser| {
            let client = client.clone();
            async move { client.unblock_user(&details).await }
        },
        reporter,
    )
}
