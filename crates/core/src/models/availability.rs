use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::release::ReleaseStatus;
use crate::paging::Pagination;

/// Lifecycle status of a single availability slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Unavailable,
}

impl SlotStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "booked" => Some(Self::Booked),
            "unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::Unavailable => "unavailable",
        }
    }

    /// Transition table for slot statuses. Re-asserting the current status
    /// is a permitted no-op; a withdrawn slot must be re-opened before it
    /// can be booked.
    pub fn can_transition_to(self, next: SlotStatus) -> bool {
        self == next || !(self == Self::Unavailable && next == Self::Booked)
    }
}

/// Approval state recorded on a slot when the examiner has been released
/// from duty for that period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseOverride {
    pub is_released: bool,
    pub reason: Option<String>,
    pub approval_status: ReleaseStatus,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<DateTime<Utc>>,
}

/// A bounded time interval on one calendar date during which an examiner
/// may be scheduled. Times are zero-padded "HH:MM" strings; the validator
/// guarantees `start_time < end_time` holds lexicographically, which for
/// this format matches numeric order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: SlotStatus,
    pub notes: Option<String>,
    pub release_override: Option<ReleaseOverride>,
}

/// The complete slot inventory owned by a single examiner.
///
/// `examiner_name` is a snapshot taken at record creation, not a live
/// reference into the identity store. `revision` is a monotonic counter
/// checked on every write to detect lost updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub id: Uuid,
    pub examiner_id: Uuid,
    pub examiner_name: String,
    pub slots: Vec<TimeSlot>,
    pub modified_by: Option<Uuid>,
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One unvalidated slot entry as submitted by the client. The date is kept
/// as a raw string until the validator has parsed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSlot {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotsRequest {
    pub examiner_id: Uuid,
    pub slots: Vec<RawSlot>,
}

/// Closed patch for a slot update. Only these four fields can be written;
/// anything else in the request body is ignored by deserialization.
///
/// An omitted field keeps its stored value, and `null` reads the same as
/// omitted. Notes can therefore be replaced but not cleared through this
/// patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSlotRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleSlotStatusRequest {
    pub new_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAvailabilityResponse {
    pub examiner_id: Uuid,
    pub examiner_name: String,
    pub slots: Vec<TimeSlot>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityReportEntry {
    pub examiner_id: Uuid,
    pub examiner_name: String,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
