use chrono::{DateTime, NaiveDate, Utc};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use examsync_core::models::availability::{ReleaseOverride, SlotStatus, TimeSlot};
use examsync_core::models::release::{DutyReleaseRequest, ReleaseStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbExaminer {
    pub id: Uuid,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityRecord {
    pub id: Uuid,
    pub examiner_id: Uuid,
    pub examiner_name: String,
    pub modified_by: Option<Uuid>,
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub record_id: Uuid,
    pub slot_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub notes: Option<String>,
    pub release_override: Option<Json<ReleaseOverride>>,
    pub created_at: DateTime<Utc>,
}

impl DbTimeSlot {
    pub fn into_core(self) -> eyre::Result<TimeSlot> {
        let status = SlotStatus::parse(&self.status)
            .ok_or_else(|| eyre!("unknown slot status '{}' in row {}", self.status, self.id))?;

        Ok(TimeSlot {
            id: self.id,
            date: self.slot_date,
            start_time: self.start_time,
            end_time: self.end_time,
            status,
            notes: self.notes,
            release_override: self.release_override.map(|json| json.0),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDutyReleaseRequest {
    pub id: Uuid,
    pub examiner_id: Uuid,
    pub examiner_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub replacement_id: Option<Uuid>,
    pub replacement_name: Option<String>,
    pub status: String,
    pub approved_by: Option<Uuid>,
    pub approval_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbDutyReleaseRequest {
    pub fn into_core(self) -> eyre::Result<DutyReleaseRequest> {
        let status = ReleaseStatus::parse(&self.status)
            .ok_or_else(|| eyre!("unknown release status '{}' in row {}", self.status, self.id))?;

        Ok(DutyReleaseRequest {
            id: self.id,
            examiner_id: self.examiner_id,
            examiner_name: self.examiner_name,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            replacement_id: self.replacement_id,
            replacement_name: self.replacement_name,
            status,
            approved_by: self.approved_by,
            approval_time: self.approval_time,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A booking row owned by the external booking subsystem. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub examiner_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub duration_minutes: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
