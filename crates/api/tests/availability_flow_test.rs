//! Exercises the slot creation flow (validation → overlap detection →
//! persistence) against mock repositories, mirroring the decision logic in
//! the availability handlers.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use examsync_core::errors::SchedulingError;
use examsync_core::models::availability::{RawSlot, SlotStatus, TimeSlot};
use examsync_core::paging::Pagination;
use examsync_core::{overlap, paging, validate};
use examsync_db::mock::repositories::{MockAvailabilityRepo, MockExaminerRepo};
use examsync_db::models::{DbAvailabilityRecord, DbExaminer, DbTimeSlot};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn raw(date: &str, start: &str, end: &str) -> RawSlot {
    RawSlot {
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        status: None,
    }
}

fn db_examiner(id: Uuid) -> DbExaminer {
    DbExaminer {
        id,
        display_name: "Dr. Example".to_string(),
        created_at: Utc::now(),
    }
}

fn db_record(examiner_id: Uuid) -> DbAvailabilityRecord {
    let now = Utc::now();
    DbAvailabilityRecord {
        id: Uuid::new_v4(),
        examiner_id,
        examiner_name: "Dr. Example".to_string(),
        modified_by: None,
        revision: 0,
        created_at: now,
        updated_at: now,
    }
}

fn db_slot(record_id: Uuid, slot: &TimeSlot) -> DbTimeSlot {
    DbTimeSlot {
        id: slot.id,
        record_id,
        slot_date: slot.date,
        start_time: slot.start_time.clone(),
        end_time: slot.end_time.clone(),
        status: slot.status.as_str().to_string(),
        notes: slot.notes.clone(),
        release_override: slot.release_override.clone().map(sqlx::types::Json),
        created_at: Utc::now(),
    }
}

/// Replays the create_slots handler logic against the mocks.
async fn create_slots_wrapper(
    examiners: &MockExaminerRepo,
    availability: &MockAvailabilityRepo,
    examiner_id: Uuid,
    raw_slots: &[RawSlot],
    actor: Uuid,
) -> Result<Vec<TimeSlot>, SchedulingError> {
    examiners
        .get_examiner_by_id(examiner_id)
        .await
        .map_err(SchedulingError::Database)?
        .ok_or_else(|| {
            SchedulingError::NotFound(format!("Examiner with ID {} not found", examiner_id))
        })?;

    let slots = validate::parse_and_validate_batch(raw_slots)?;

    if overlap::detect_overlap(&slots) {
        return Err(SchedulingError::Conflict(
            "batch contains overlapping slots on the same date".to_string(),
        ));
    }

    let record = availability
        .get_record_by_examiner_id(examiner_id)
        .await
        .map_err(SchedulingError::Database)?
        .ok_or_else(|| SchedulingError::NotFound("record".to_string()))?;

    let appended = availability
        .append_slots(record.id, record.revision, slots.clone(), actor)
        .await
        .map_err(SchedulingError::Database)?;

    if !appended {
        return Err(SchedulingError::Conflict(
            "availability record was modified concurrently, retry the request".to_string(),
        ));
    }

    Ok(slots)
}

/// Replays the get_availability handler's read side against the mock repo.
async fn get_availability_wrapper(
    availability: &MockAvailabilityRepo,
    record_id: Uuid,
    page: u32,
    limit: u32,
) -> Result<(Vec<TimeSlot>, Pagination), SchedulingError> {
    let db_slots = availability
        .get_slots_by_record_id(record_id)
        .await
        .map_err(SchedulingError::Database)?;

    let mut slots = Vec::with_capacity(db_slots.len());
    for db_slot in db_slots {
        slots.push(db_slot.into_core().map_err(SchedulingError::Database)?);
    }

    let filtered = paging::filter_slots(slots, None, None, None);
    Ok(paging::paginate(filtered, page, limit))
}

/// Replays the toggle_slot_status handler logic against the mock repo.
async fn toggle_status_wrapper(
    availability: &MockAvailabilityRepo,
    slot_id: Uuid,
    new_status: &str,
    actor: Uuid,
) -> Result<TimeSlot, SchedulingError> {
    let new_status = SlotStatus::parse(new_status).ok_or_else(|| {
        SchedulingError::InvalidState(format!("'{new_status}' is not a valid slot status"))
    })?;

    let (db_slot, record) = availability
        .find_slot_with_record(slot_id)
        .await
        .map_err(SchedulingError::Database)?
        .ok_or_else(|| SchedulingError::NotFound(format!("Slot with ID {} not found", slot_id)))?;

    let current = db_slot.into_core().map_err(SchedulingError::Database)?;

    if !current.status.can_transition_to(new_status) {
        return Err(SchedulingError::InvalidState(format!(
            "cannot change a {} slot to {}",
            current.status.as_str(),
            new_status.as_str()
        )));
    }

    availability
        .update_slot(
            slot_id,
            record.id,
            record.revision,
            current.start_time.clone(),
            current.end_time.clone(),
            new_status.as_str().to_string(),
            current.notes.clone(),
            actor,
        )
        .await
        .map_err(SchedulingError::Database)?
        .ok_or_else(|| {
            SchedulingError::Conflict(
                "availability record was modified concurrently, retry the request".to_string(),
            )
        })?
        .into_core()
        .map_err(SchedulingError::Database)
}

#[tokio::test]
async fn test_back_to_back_batch_is_accepted() {
    let examiner_id = Uuid::new_v4();

    let mut examiners = MockExaminerRepo::new();
    examiners
        .expect_get_examiner_by_id()
        .returning(|id| Ok(Some(db_examiner(id))));

    let mut availability = MockAvailabilityRepo::new();
    availability
        .expect_get_record_by_examiner_id()
        .returning(|id| Ok(Some(db_record(id))));
    availability
        .expect_append_slots()
        .returning(|_, _, _, _| Ok(true));

    let batch = vec![
        raw("2024-03-20", "09:00", "10:00"),
        raw("2024-03-20", "10:00", "11:00"),
    ];

    let slots = create_slots_wrapper(&examiners, &availability, examiner_id, &batch, Uuid::new_v4())
        .await
        .expect("back-to-back slots should be accepted");

    assert_eq!(slots.len(), 2);
}

#[tokio::test]
async fn test_overlapping_batch_is_rejected_before_any_write() {
    let mut examiners = MockExaminerRepo::new();
    examiners
        .expect_get_examiner_by_id()
        .returning(|id| Ok(Some(db_examiner(id))));

    let mut availability = MockAvailabilityRepo::new();
    // Nothing may reach the store when the batch overlaps
    availability.expect_get_record_by_examiner_id().never();
    availability.expect_append_slots().never();

    let batch = vec![
        raw("2024-03-20", "09:00", "10:30"),
        raw("2024-03-20", "10:00", "11:00"),
    ];

    let err = create_slots_wrapper(
        &examiners,
        &availability,
        Uuid::new_v4(),
        &batch,
        Uuid::new_v4(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SchedulingError::Conflict(_)));
}

#[tokio::test]
async fn test_invalid_batch_is_rejected_before_any_write() {
    let mut examiners = MockExaminerRepo::new();
    examiners
        .expect_get_examiner_by_id()
        .returning(|id| Ok(Some(db_examiner(id))));

    let mut availability = MockAvailabilityRepo::new();
    availability.expect_get_record_by_examiner_id().never();
    availability.expect_append_slots().never();

    let batch = vec![raw("2024-03-20", "10:00", "09:00")];

    let err = create_slots_wrapper(
        &examiners,
        &availability,
        Uuid::new_v4(),
        &batch,
        Uuid::new_v4(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SchedulingError::Validation(_)));
}

#[tokio::test]
async fn test_unknown_examiner_is_not_found() {
    let mut examiners = MockExaminerRepo::new();
    examiners.expect_get_examiner_by_id().returning(|_| Ok(None));

    let availability = MockAvailabilityRepo::new();

    let batch = vec![raw("2024-03-20", "09:00", "10:00")];

    let err = create_slots_wrapper(
        &examiners,
        &availability,
        Uuid::new_v4(),
        &batch,
        Uuid::new_v4(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SchedulingError::NotFound(_)));
}

#[tokio::test]
async fn test_lost_revision_race_surfaces_as_conflict() {
    let mut examiners = MockExaminerRepo::new();
    examiners
        .expect_get_examiner_by_id()
        .returning(|id| Ok(Some(db_examiner(id))));

    let mut availability = MockAvailabilityRepo::new();
    availability
        .expect_get_record_by_examiner_id()
        .returning(|id| Ok(Some(db_record(id))));
    // Another writer bumped the revision between read and write
    availability
        .expect_append_slots()
        .returning(|_, _, _, _| Ok(false));

    let batch = vec![raw("2024-03-20", "09:00", "10:00")];

    let err = create_slots_wrapper(
        &examiners,
        &availability,
        Uuid::new_v4(),
        &batch,
        Uuid::new_v4(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SchedulingError::Conflict(_)));
}

#[tokio::test]
async fn test_created_batch_comes_back_from_the_query_unchanged() {
    let examiner_id = Uuid::new_v4();
    let record_id = Uuid::new_v4();
    let stored: Arc<Mutex<Vec<TimeSlot>>> = Arc::new(Mutex::new(Vec::new()));

    let mut examiners = MockExaminerRepo::new();
    examiners
        .expect_get_examiner_by_id()
        .returning(|id| Ok(Some(db_examiner(id))));

    let mut availability = MockAvailabilityRepo::new();
    availability
        .expect_get_record_by_examiner_id()
        .returning(move |examiner_id| {
            let mut record = db_record(examiner_id);
            record.id = record_id;
            Ok(Some(record))
        });

    let sink = Arc::clone(&stored);
    availability
        .expect_append_slots()
        .returning(move |_, _, slots, _| {
            sink.lock().unwrap().extend(slots);
            Ok(true)
        });

    let source = Arc::clone(&stored);
    availability
        .expect_get_slots_by_record_id()
        .returning(move |record_id| {
            let slots = source.lock().unwrap();
            Ok(slots.iter().map(|s| db_slot(record_id, s)).collect())
        });

    let batch = vec![
        raw("2024-03-20", "09:00", "10:00"),
        raw("2024-03-21", "14:00", "15:30"),
    ];

    let created =
        create_slots_wrapper(&examiners, &availability, examiner_id, &batch, Uuid::new_v4())
            .await
            .expect("batch should be accepted");

    let (page_slots, pagination) = get_availability_wrapper(&availability, record_id, 1, 10)
        .await
        .expect("query should succeed");

    // Exactly the created slots come back, fields intact and in order
    assert_eq!(page_slots.len(), created.len());
    for (got, want) in page_slots.iter().zip(&created) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.date, want.date);
        assert_eq!(got.start_time, want.start_time);
        assert_eq!(got.end_time, want.end_time);
        assert_eq!(got.status, want.status);
        assert_eq!(got.notes, want.notes);
    }
    assert_eq!(pagination.total, 2);
    assert_eq!(pagination.pages, 1);
}

#[tokio::test]
async fn test_noop_status_toggle_preserves_all_other_fields() {
    let slot_id = Uuid::new_v4();

    let mut availability = MockAvailabilityRepo::new();
    availability
        .expect_find_slot_with_record()
        .returning(move |slot_id| {
            let record = db_record(Uuid::new_v4());
            let slot = TimeSlot {
                id: slot_id,
                date: date("2024-03-20"),
                start_time: "09:00".to_string(),
                end_time: "10:00".to_string(),
                status: SlotStatus::Booked,
                notes: Some("bring the rubric".to_string()),
                release_override: None,
            };
            Ok(Some((db_slot(record.id, &slot), record)))
        });
    // Echo back exactly what the handler writes
    availability.expect_update_slot().returning(
        |slot_id, record_id, _, start_time, end_time, status, notes, _| {
            Ok(Some(DbTimeSlot {
                id: slot_id,
                record_id,
                slot_date: date("2024-03-20"),
                start_time,
                end_time,
                status,
                notes,
                release_override: None,
                created_at: Utc::now(),
            }))
        },
    );

    let updated = toggle_status_wrapper(&availability, slot_id, "booked", Uuid::new_v4())
        .await
        .expect("re-asserting the current status is a permitted no-op");

    assert_eq!(updated.status, SlotStatus::Booked);
    assert_eq!(updated.start_time, "09:00");
    assert_eq!(updated.end_time, "10:00");
    assert_eq!(updated.notes.as_deref(), Some("bring the rubric"));
}

#[tokio::test]
async fn test_withdrawn_slot_cannot_be_booked_directly() {
    let mut availability = MockAvailabilityRepo::new();
    availability
        .expect_find_slot_with_record()
        .returning(move |slot_id| {
            let record = db_record(Uuid::new_v4());
            let slot = TimeSlot {
                id: slot_id,
                date: date("2024-03-20"),
                start_time: "09:00".to_string(),
                end_time: "10:00".to_string(),
                status: SlotStatus::Unavailable,
                notes: None,
                release_override: None,
            };
            Ok(Some((db_slot(record.id, &slot), record)))
        });
    // A forbidden transition must never reach the store
    availability.expect_update_slot().never();

    let err = toggle_status_wrapper(&availability, Uuid::new_v4(), "booked", Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, SchedulingError::InvalidState(_)));
}
