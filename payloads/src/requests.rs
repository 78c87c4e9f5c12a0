use crate::{ReportId, UserId, VerificationId};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Date-range filter keys shared by every list screen.
pub const FILTER_START_DATE: &str = "startDate";
pub const FILTER_END_DATE: &str = "endDate";
pub const FILTER_STATUS: &str = "status";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUser {
    pub user_id: UserId,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnblockUser {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    UnderReview,
    Resolved,
    Dismissed,
}

/// Move a report to a new status. Only `status` goes in the body; the
/// report id is part of the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatusChange {
    #[serde(skip)]
    pub report_id: Option<ReportId>,
    pub status: ReportStatus,
}

impl ReportStatusChange {
    pub fn new(report_id: ReportId, status: ReportStatus) -> Self {
        Self {
            report_id: Some(report_id),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeStatus {
    Pending,
    Verified,
    Rejected,
}

/// Approve or reject a verified badge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatusChange {
    #[serde(skip)]
    pub verification_id: Option<VerificationId>,
    pub status: BadgeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl BadgeStatusChange {
    pub fn approve(verification_id: VerificationId) -> Self {
        Self {
            verification_id: Some(verification_id),
            status: BadgeStatus::Verified,
            rejection_reason: None,
        }
    }

    pub fn reject(
        verification_id: VerificationId,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            verification_id: Some(verification_id),
            status: BadgeStatus::Rejected,
            rejection_reason: Some(reason.into()),
        }
    }
}

/// A push notification broadcast to app users. Left unscheduled it is sent
/// immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotification {
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_for: Option<Timestamp>,
}

/// Validation result for a state-changing request, checked before it is
/// sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestValidation {
    Valid,
    MissingTitle,
    MissingMessage,
    MissingRejectionReason,
    MissingTarget,
}

impl RequestValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::MissingTitle => Some("Title is required"),
            Self::MissingMessage => Some("Message is required"),
            Self::MissingRejectionReason => {
                Some("A reason is required to reject a verification request")
            }
            Self::MissingTarget => Some("No target selected for this action"),
        }
    }
}

/// Requests that can be checked locally before hitting the network.
pub trait Validate {
    fn validate(&self) -> RequestValidation;
}

impl Validate for CreateNotification {
    fn validate(&self) -> RequestValidation {
        if self.title.trim().is_empty() {
            return RequestValidation::MissingTitle;
        }
        if self.message.trim().is_empty() {
            return RequestValidation::MissingMessage;
        }
        RequestValidation::Valid
    }
}

impl Validate for BadgeStatusChange {
    fn validate(&self) -> RequestValidation {
        match &self.verification_id {
            Some(id) if !id.is_empty() => {}
            _ => return RequestValidation::MissingTarget,
        }
        let has_reason = self
            .rejection_reason
            .as_deref()
            .is_some_and(|reason| !reason.trim().is_empty());
        if self.status == BadgeStatus::Rejected && !has_reason {
            return RequestValidation::MissingRejectionReason;
        }
        RequestValidation::Valid
    }
}

impl Validate for ReportStatusChange {
    fn validate(&self) -> RequestValidation {
        match &self.report_id {
            Some(id) if !id.is_empty() => RequestValidation::Valid,
            _ => RequestValidation::MissingTarget,
        }
    }
}

impl Validate for BlockUser {
    fn validate(&self) -> RequestValidation {
        if self.user_id.is_empty() {
            return RequestValidation::MissingTarget;
        }
        RequestValidation::Valid
    }
}

impl Validate for UnblockUser {
    fn validate(&self) -> RequestValidation {
        if self.user_id.is_empty() {
            return RequestValidation::MissingTarget;
        }
        RequestValidation::Valid
    }
}

impl Validate for serde_json::Value {
    fn validate(&self) -> RequestValidation {
        RequestValidation::Valid
    }
}
