use payloads::responses::Order;
use payloads::{APIClient, OrderId, QueryParameters, endpoints};
use std::sync::Arc;

use super::use_detail::use_resource_detail;
use super::{DetailHook, QueryHook, use_resource_list};
use crate::ErrorReporter;

/// Rental orders, filterable by `startDate` and `endDate`.
pub async fn use_orders(
    client: Arc<APIClient>,
    params: QueryParameters,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<Order> {
    use_resource_list(client, endpoints::ORDERS, params, reporter).await
}

pub async fn use_order_detail(
    client: Arc<APIClient>,
    order_id: Option<OrderId>,
    reporter: Arc<dyn ErrorReporter>,
) -> DetailHook<OrderId, Order> {
    use_resource_detail(client, endpoints::ORDER, order_id, reporter).await
}
