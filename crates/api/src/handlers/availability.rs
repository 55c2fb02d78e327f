//! # Availability Handlers
//!
//! Handlers for managing examiner slot inventories: batch slot creation
//! with overlap detection, filtered and paginated queries, slot updates,
//! status toggles, and deletion.
//!
//! Slot creation flows validation → overlap detection → persistence. The
//! overlap check runs over the submitted batch alone; it does not compare
//! the batch against slots already stored for the examiner. Writes are
//! guarded by the owning record's revision counter, so two concurrent
//! writers cannot silently lose an update; the loser gets a conflict
//! response and retries.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use examsync_core::{
    errors::SchedulingError,
    models::availability::{
        AvailabilityRecord, CreateSlotsRequest, GetAvailabilityResponse, MessageResponse,
        SlotStatus, TimeSlot, ToggleSlotStatusRequest, UpdateSlotRequest,
    },
    overlap, paging, validate,
};

use crate::{handlers::actor_id, middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability listing endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

async fn load_slots(pool: &PgPool, record_id: Uuid) -> Result<Vec<TimeSlot>, AppError> {
    let db_slots = examsync_db::repositories::availability::get_slots_by_record_id(pool, record_id)
        .await
        .map_err(SchedulingError::Database)?;

    let mut slots = Vec::with_capacity(db_slots.len());
    for db_slot in db_slots {
        slots.push(db_slot.into_core().map_err(SchedulingError::Database)?);
    }
    Ok(slots)
}

/// Creates a batch of availability slots for an examiner.
///
/// The whole batch is validated and checked for internal overlaps before
/// anything is written; a rejected batch persists nothing.
#[axum::debug_handler]
pub async fn create_slots(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSlotsRequest>,
) -> Result<(StatusCode, Json<AvailabilityRecord>), AppError> {
    let actor = actor_id(&headers)?;

    // Resolve the examiner through the identity collaborator
    let examiner = examsync_db::repositories::examiner::get_examiner_by_id(
        &state.db_pool,
        payload.examiner_id,
    )
    .await
    .map_err(SchedulingError::Database)?
    .ok_or_else(|| {
        SchedulingError::NotFound(format!("Examiner with ID {} not found", payload.examiner_id))
    })?;

    // Validate and normalize the batch
    let slots = validate::parse_and_validate_batch(&payload.slots)?;

    // Reject batches with internal overlaps before any write
    if overlap::detect_overlap(&slots) {
        return Err(AppError(SchedulingError::Conflict(
            "batch contains overlapping slots on the same date".to_string(),
        )));
    }

    // Fetch or create the examiner's record, then append atomically
    let record = match examsync_db::repositories::availability::get_record_by_examiner_id(
        &state.db_pool,
        payload.examiner_id,
    )
    .await
    .map_err(SchedulingError::Database)?
    {
        Some(record) => record,
        None => {
            examsync_db::repositories::availability::create_record(
                &state.db_pool,
                payload.examiner_id,
                &examiner.display_name,
                actor,
            )
            .await
            .map_err(SchedulingError::Database)?
        }
    };

    let appended = examsync_db::repositories::availability::append_slots(
        &state.db_pool,
        record.id,
        record.revision,
        &slots,
        actor,
    )
    .await
    .map_err(SchedulingError::Database)?;

    if !appended {
        return Err(AppError(SchedulingError::Conflict(
            "availability record was modified concurrently, retry the request".to_string(),
        )));
    }

    // Return the updated record
    let record = examsync_db::repositories::availability::get_record_by_examiner_id(
        &state.db_pool,
        payload.examiner_id,
    )
    .await
    .map_err(SchedulingError::Database)?
    .ok_or_else(|| {
        SchedulingError::NotFound(format!(
            "Availability record for examiner {} not found",
            payload.examiner_id
        ))
    })?;

    let all_slots = load_slots(&state.db_pool, record.id).await?;

    let response = AvailabilityRecord {
        id: record.id,
        examiner_id: record.examiner_id,
        examiner_name: record.examiner_name,
        slots: all_slots,
        modified_by: record.modified_by,
        revision: record.revision,
        created_at: record.created_at,
        updated_at: record.updated_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Returns an examiner's slots, filtered and paginated in memory.
///
/// An examiner with no record yet gets an empty list with a zero total
/// rather than an error.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(examiner_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<GetAvailabilityResponse>, AppError> {
    let page = query.page.unwrap_or(paging::DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(paging::DEFAULT_LIMIT);

    let start_date = query
        .start_date
        .as_deref()
        .map(|v| validate::parse_date_param("start_date", v))
        .transpose()?;
    let end_date = query
        .end_date
        .as_deref()
        .map(|v| validate::parse_date_param("end_date", v))
        .transpose()?;
    let status = query
        .status
        .as_deref()
        .map(|s| {
            SlotStatus::parse(s)
                .ok_or_else(|| SchedulingError::Validation(format!("unknown status '{s}'")))
        })
        .transpose()?;

    let record = examsync_db::repositories::availability::get_record_by_examiner_id(
        &state.db_pool,
        examiner_id,
    )
    .await
    .map_err(SchedulingError::Database)?;

    let Some(record) = record else {
        // No record yet: fall back to the identity store for the name
        let examiner_name =
            examsync_db::repositories::examiner::get_examiner_by_id(&state.db_pool, examiner_id)
                .await
                .map_err(SchedulingError::Database)?
                .map(|e| e.display_name)
                .unwrap_or_default();

        return Ok(Json(GetAvailabilityResponse {
            examiner_id,
            examiner_name,
            slots: Vec::new(),
            pagination: paging::Pagination::new(0, page, limit),
        }));
    };

    let slots = load_slots(&state.db_pool, record.id).await?;
    let filtered = paging::filter_slots(slots, start_date, end_date, status);
    let (page_slots, pagination) = paging::paginate(filtered, page, limit);

    Ok(Json(GetAvailabilityResponse {
        examiner_id,
        examiner_name: record.examiner_name,
        slots: page_slots,
        pagination,
    }))
}

/// Applies a closed patch to one slot.
///
/// When either time field is touched, the merged pair is re-validated for
/// format and ordering before anything is written. Omitted fields keep
/// their stored values; `notes: null` is indistinguishable from an absent
/// key on the wire, so notes can be replaced but never cleared here.
#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    headers: HeaderMap,
    Json(patch): Json<UpdateSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let actor = actor_id(&headers)?;

    let (db_slot, record) =
        examsync_db::repositories::availability::find_slot_with_record(&state.db_pool, slot_id)
            .await
            .map_err(SchedulingError::Database)?
            .ok_or_else(|| {
                SchedulingError::NotFound(format!("Slot with ID {} not found", slot_id))
            })?;

    let current = db_slot.into_core().map_err(SchedulingError::Database)?;

    // Merge the patch over the stored fields
    let start_time = patch.start_time.as_deref().unwrap_or(&current.start_time);
    let end_time = patch.end_time.as_deref().unwrap_or(&current.end_time);

    if patch.start_time.is_some() || patch.end_time.is_some() {
        if !validate::validate_time_format(start_time) {
            return Err(AppError(SchedulingError::Validation(format!(
                "invalid start time '{start_time}', expected HH:MM"
            ))));
        }
        if !validate::validate_time_format(end_time) {
            return Err(AppError(SchedulingError::Validation(format!(
                "invalid end time '{end_time}', expected HH:MM"
            ))));
        }
        if start_time >= end_time {
            return Err(AppError(SchedulingError::Validation(format!(
                "start time {start_time} must be before end time {end_time}"
            ))));
        }
    }

    let status = match patch.status.as_deref() {
        Some(s) => SlotStatus::parse(s)
            .ok_or_else(|| SchedulingError::Validation(format!("unknown status '{s}'")))?,
        None => current.status,
    };
    let notes = patch.notes.or(current.notes);

    let updated = examsync_db::repositories::availability::update_slot(
        &state.db_pool,
        slot_id,
        record.id,
        record.revision,
        start_time,
        end_time,
        status.as_str(),
        notes.as_deref(),
        actor,
    )
    .await
    .map_err(SchedulingError::Database)?
    .ok_or_else(|| {
        SchedulingError::Conflict(
            "availability record was modified concurrently, retry the request".to_string(),
        )
    })?;

    Ok(Json(updated.into_core().map_err(SchedulingError::Database)?))
}

/// Moves a slot to a new status.
///
/// Re-asserting the current status is a permitted no-op. Moving a booked
/// slot to unavailable is where a cancellation notification would hook in;
/// for now it performs only the status write.
#[axum::debug_handler]
pub async fn toggle_slot_status(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<ToggleSlotStatusRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let actor = actor_id(&headers)?;

    let new_status = SlotStatus::parse(&payload.new_status).ok_or_else(|| {
        SchedulingError::InvalidState(format!(
            "'{}' is not a valid slot status",
            payload.new_status
        ))
    })?;

    let (db_slot, record) =
        examsync_db::repositories::availability::find_slot_with_record(&state.db_pool, slot_id)
            .await
            .map_err(SchedulingError::Database)?
            .ok_or_else(|| {
                SchedulingError::NotFound(format!("Slot with ID {} not found", slot_id))
            })?;

    let current = db_slot.into_core().map_err(SchedulingError::Database)?;

    if !current.status.can_transition_to(new_status) {
        return Err(AppError(SchedulingError::InvalidState(format!(
            "cannot change a {} slot to {}",
            current.status.as_str(),
            new_status.as_str()
        ))));
    }

    let updated = examsync_db::repositories::availability::update_slot(
        &state.db_pool,
        slot_id,
        record.id,
        record.revision,
        &current.start_time,
        &current.end_time,
        new_status.as_str(),
        current.notes.as_deref(),
        actor,
    )
    .await
    .map_err(SchedulingError::Database)?
    .ok_or_else(|| {
        SchedulingError::Conflict(
            "availability record was modified concurrently, retry the request".to_string(),
        )
    })?;

    Ok(Json(updated.into_core().map_err(SchedulingError::Database)?))
}

/// Removes a slot from its owning record.
#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let actor = actor_id(&headers)?;

    let (_db_slot, record) =
        examsync_db::repositories::availability::find_slot_with_record(&state.db_pool, slot_id)
            .await
            .map_err(SchedulingError::Database)?
            .ok_or_else(|| {
                SchedulingError::NotFound(format!("Slot with ID {} not found", slot_id))
            })?;

    let deleted = examsync_db::repositories::availability::delete_slot(
        &state.db_pool,
        slot_id,
        record.id,
        record.revision,
        actor,
    )
    .await
    .map_err(SchedulingError::Database)?;

    if !deleted {
        return Err(AppError(SchedulingError::Conflict(
            "availability record was modified concurrently, retry the request".to_string(),
        )));
    }

    Ok(Json(MessageResponse {
        message: "Slot deleted".to_string(),
    }))
}
