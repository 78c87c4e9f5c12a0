//! Where each admin resource lives on the backend and how its payload is
//! shaped.

/// Shape of a paginated list endpoint: the collection is read from
/// `data.<collection>` and the totals from `data.<pagination>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEndpoint {
    pub path: &'static str,
    pub collection: &'static str,
    pub pagination: &'static str,
}

/// Shape of a fetch-by-id endpoint. The id is appended as the last path
/// segment; `projection` selects a field inside `data` when the entity is
/// nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailEndpoint {
    pub path: &'static str,
    pub projection: Option<&'static str>,
}

impl DetailEndpoint {
    pub fn path_for(&self, id: &impl std::fmt::Display) -> String {
        format!("{}/{id}", self.path)
    }
}

pub const USERS: ListEndpoint = ListEndpoint {
    path: "admin/users",
    collection: "users",
    pagination: "pagination",
};

pub const ORDERS: ListEndpoint = ListEndpoint {
    path: "admin/orders",
    collection: "orders",
    pagination: "pagination",
};

pub const REPORTS: ListEndpoint = ListEndpoint {
    path: "admin/reports",
    collection: "reports",
    pagination: "pagination",
};

pub const NOTIFICATIONS: ListEndpoint = ListEndpoint {
    path: "admin/get-notifications",
    collection: "notifications",
    pagination: "pagination",
};

pub const VERIFICATION_REQUESTS: ListEndpoint = ListEndpoint {
    path: "admin/verification-requests",
    collection: "users",
    pagination: "pagination",
};

/// In-app purchases of featured product placements.
pub const FEATURED_PRODUCTS: ListEndpoint = ListEndpoint {
    path: "admin/iap-revenue",
    collection: "purchases",
    pagination: "pagination",
};

/// Activity overview for a single user.
pub const USER_ACTIVITY: DetailEndpoint = DetailEndpoint {
    path: "admin/users-activity",
    projection: None,
};

pub const ORDER: DetailEndpoint = DetailEndpoint {
    path: "admin/order",
    projection: None,
};

pub const REPORT: DetailEndpoint = DetailEndpoint {
    path: "admin/report",
    projection: None,
};

pub const VERIFICATION_REQUEST: DetailEndpoint = DetailEndpoint {
    path: "admin/verification-request",
    projection: Some("user"),
};

pub const DASHBOARD_STATS: &str = "admin/stats";
pub const APP_CONFIG: &str = "global/config";
pub const BLOCK_USER: &str = "admin/block-user";
pub const UNBLOCK_USER: &str = "admin/unblock-user";
pub const SEND_NOTIFICATION: &str = "admin/send-notifications";

pub fn report_status(report_id: &impl std::fmt::Display) -> String {
    format!("admin/report/{report_id}/mark-as")
}

pub fn verify_user(verification_id: &impl std::fmt::Display) -> String {
    format!("admin/verify-user/{verification_id}")
}
