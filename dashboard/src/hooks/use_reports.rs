use payloads::requests::ReportStatusChange;
use payloads::responses::Report;
use payloads::{APIClient, QueryParameters, ReportId, endpoints};
use std::sync::Arc;

use super::use_detail::use_resource_detail;
use super::{DetailHook, MutationHook, QueryHook, use_mutation, use_resource_list};
use crate::ErrorReporter;

/// Abuse reports, filterable by date range and status.
pub async fn use_reports(
    client: Arc<APIClient>,
    params: QueryParameters,
    reporter: Arc<dyn ErrorReporter>,
) -> QueryHook<Report> {
    use_resource_list(client, endpoints::REPORTS, params, reporter).await
}

pub async fn use_report_detail(
    client: Arc<APIClient>,
    report_id: Option<ReportId>,
    reporter: Arc<dyn ErrorReporter>,
) -> DetailHook<ReportId, Report> {
    use_resource_detail(client, endpoints::REPORT, report_id, reporter).await
}

/// Move a report through its review states.
pub fn use_report_status(
    client: Arc<APIClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> MutationHook<ReportStatusChange> {
    use_mutation(
        "report status",
        move |change: ReportStatusChange| {
            let client = client.clone();
            async move { client.change_report_status(&change).await }
        },
        reporter,
    )
}
