use payloads::responses::Purchase;
use payloads::{APIClient, QueryParameters, endpoints};
use std::sync::Arc;

use super::{QueryHook, use_resource_list};
use crate::ErrorReporter;

/// In-app purchases made to feature a listing.
pub async fn use_featured_products(
    client: Arc<APIClient>,
    params: QueryParameters,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<Purchase> {
    use_resource_list(client, endpoints::FEATURED_PRODUCTS, params, reporter)
        .await
}
