use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::paging::Pagination;

/// Approval state of a duty release request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReleaseStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Transition table for release requests. A pending request can move
    /// anywhere; approved and rejected are terminal apart from the no-op.
    pub fn can_transition_to(self, next: ReleaseStatus) -> bool {
        self == next || self == Self::Pending
    }
}

/// An exception period excusing an examiner from duties, optionally naming
/// a replacement lecturer. Examiner and replacement names are snapshots
/// taken when the request is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyReleaseRequest {
    pub id: Uuid,
    pub examiner_id: Uuid,
    pub examiner_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub replacement_id: Option<Uuid>,
    pub replacement_name: Option<String>,
    pub status: ReleaseStatus,
    pub approved_by: Option<Uuid>,
    pub approval_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReleaseRequest {
    pub examiner_id: Uuid,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub replacement_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReleaseStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReleasesResponse {
    pub items: Vec<DutyReleaseRequest>,
    pub pagination: Pagination,
}
