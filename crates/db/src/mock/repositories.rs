use chrono::{DateTime, NaiveDate, Utc};
use examsync_core::models::availability::TimeSlot;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAvailabilityRecord, DbBooking, DbDutyReleaseRequest, DbExaminer, DbTimeSlot};

// Mock repositories for testing
mock! {
    pub ExaminerRepo {
        pub async fn get_examiner_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbExaminer>>;
    }
}

mock! {
    pub AvailabilityRepo {
        pub async fn get_record_by_examiner_id(
            &self,
            examiner_id: Uuid,
        ) -> eyre::Result<Option<DbAvailabilityRecord>>;

        pub async fn create_record(
            &self,
            examiner_id: Uuid,
            examiner_name: &'static str,
            actor_id: Uuid,
        ) -> eyre::Result<DbAvailabilityRecord>;

        pub async fn append_slots(
            &self,
            record_id: Uuid,
            expected_revision: i64,
            slots: Vec<TimeSlot>,
            actor_id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn get_slots_by_record_id(
            &self,
            record_id: Uuid,
        ) -> eyre::Result<Vec<DbTimeSlot>>;

        pub async fn find_slot_with_record(
            &self,
            slot_id: Uuid,
        ) -> eyre::Result<Option<(DbTimeSlot, DbAvailabilityRecord)>>;

        pub async fn update_slot(
            &self,
            slot_id: Uuid,
            record_id: Uuid,
            expected_revision: i64,
            start_time: String,
            end_time: String,
            status: String,
            notes: Option<String>,
            actor_id: Uuid,
        ) -> eyre::Result<Option<DbTimeSlot>>;

        pub async fn delete_slot(
            &self,
            slot_id: Uuid,
            record_id: Uuid,
            expected_revision: i64,
            actor_id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub ReleaseRepo {
        pub async fn get_release_request_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbDutyReleaseRequest>>;

        pub async fn update_release_status(
            &self,
            id: Uuid,
            status: &'static str,
            approved_by: Option<Uuid>,
            approval_time: Option<DateTime<Utc>>,
        ) -> eyre::Result<Option<DbDutyReleaseRequest>>;

        pub async fn delete_pending_release_request(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn get_bookings_for_date(
            &self,
            examiner_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbBooking>>;
    }
}
