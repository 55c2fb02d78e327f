//! # Duty Release Handlers
//!
//! Handlers for the duty release workflow: creating exception requests
//! against an examiner's duty obligations, listing and fetching them, and
//! moving them through the pending → approved/rejected lifecycle.
//!
//! Approving a release does not touch the examiner's availability slots;
//! the two subsystems share only the identity lookup.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use examsync_core::{
    errors::SchedulingError,
    models::availability::MessageResponse,
    models::release::{
        CreateReleaseRequest, DutyReleaseRequest, ListReleasesResponse, ReleaseStatus,
        UpdateReleaseStatusRequest,
    },
    paging, validate,
};

use crate::{handlers::actor_id, middleware::error_handling::AppError, ApiState};

/// Query parameters for the release request listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ReleaseListQuery {
    pub examiner_id: Option<Uuid>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Creates a duty release request. New requests always start pending.
#[axum::debug_handler]
pub async fn create_release(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateReleaseRequest>,
) -> Result<(StatusCode, Json<DutyReleaseRequest>), AppError> {
    let start_date = validate::parse_date_param("start_date", &payload.start_date)?;
    let end_date = validate::parse_date_param("end_date", &payload.end_date)?;

    if start_date > end_date {
        return Err(AppError(SchedulingError::Validation(format!(
            "start date {start_date} must not be after end date {end_date}"
        ))));
    }

    let examiner = examsync_db::repositories::examiner::get_examiner_by_id(
        &state.db_pool,
        payload.examiner_id,
    )
    .await
    .map_err(SchedulingError::Database)?
    .ok_or_else(|| {
        SchedulingError::NotFound(format!("Examiner with ID {} not found", payload.examiner_id))
    })?;

    // Snapshot the replacement lecturer's name when one is named
    let replacement_name = match payload.replacement_id {
        Some(replacement_id) => Some(
            examsync_db::repositories::examiner::get_examiner_by_id(
                &state.db_pool,
                replacement_id,
            )
            .await
            .map_err(SchedulingError::Database)?
            .ok_or_else(|| {
                SchedulingError::NotFound(format!(
                    "Replacement lecturer with ID {} not found",
                    replacement_id
                ))
            })?
            .display_name,
        ),
        None => None,
    };

    let request = examsync_db::repositories::release::create_release_request(
        &state.db_pool,
        payload.examiner_id,
        &examiner.display_name,
        start_date,
        end_date,
        &payload.reason,
        payload.replacement_id,
        replacement_name.as_deref(),
    )
    .await
    .map_err(SchedulingError::Database)?;

    let response = request.into_core().map_err(SchedulingError::Database)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists release requests with optional examiner and status filters.
/// Pagination happens in SQL, with the total counted over the same filters.
#[axum::debug_handler]
pub async fn list_releases(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ReleaseListQuery>,
) -> Result<Json<ListReleasesResponse>, AppError> {
    let page = query.page.unwrap_or(paging::DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(paging::DEFAULT_LIMIT);

    let status = query
        .status
        .as_deref()
        .map(|s| {
            ReleaseStatus::parse(s)
                .ok_or_else(|| SchedulingError::Validation(format!("unknown status '{s}'")))
        })
        .transpose()?;

    let (db_items, total) = examsync_db::repositories::release::list_release_requests(
        &state.db_pool,
        query.examiner_id,
        status.map(|s| s.as_str()),
        page,
        limit,
    )
    .await
    .map_err(SchedulingError::Database)?;

    let mut items = Vec::with_capacity(db_items.len());
    for item in db_items {
        items.push(item.into_core().map_err(SchedulingError::Database)?);
    }

    Ok(Json(ListReleasesResponse {
        items,
        pagination: paging::Pagination::new(total, page, limit),
    }))
}

#[axum::debug_handler]
pub async fn get_release(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DutyReleaseRequest>, AppError> {
    let request = examsync_db::repositories::release::get_release_request_by_id(&state.db_pool, id)
        .await
        .map_err(SchedulingError::Database)?
        .ok_or_else(|| {
            SchedulingError::NotFound(format!("Release request with ID {} not found", id))
        })?;

    Ok(Json(request.into_core().map_err(SchedulingError::Database)?))
}

/// Moves a release request to a new status.
///
/// The transition table forbids leaving a terminal state; approving or
/// rejecting stamps the approver id and approval timestamp.
#[axum::debug_handler]
pub async fn set_release_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<UpdateReleaseStatusRequest>,
) -> Result<Json<DutyReleaseRequest>, AppError> {
    let approver = actor_id(&headers)?;

    let new_status = ReleaseStatus::parse(&payload.status).ok_or_else(|| {
        SchedulingError::InvalidState(format!(
            "'{}' is not a valid release status",
            payload.status
        ))
    })?;

    let current = examsync_db::repositories::release::get_release_request_by_id(&state.db_pool, id)
        .await
        .map_err(SchedulingError::Database)?
        .ok_or_else(|| {
            SchedulingError::NotFound(format!("Release request with ID {} not found", id))
        })?
        .into_core()
        .map_err(SchedulingError::Database)?;

    if !current.status.can_transition_to(new_status) {
        return Err(AppError(SchedulingError::InvalidState(format!(
            "cannot change a {} request to {}",
            current.status.as_str(),
            new_status.as_str()
        ))));
    }

    let (approved_by, approval_time) = if new_status.is_terminal() {
        (Some(approver), Some(Utc::now()))
    } else {
        (None, None)
    };

    let updated = examsync_db::repositories::release::update_release_status(
        &state.db_pool,
        id,
        new_status.as_str(),
        approved_by,
        approval_time,
    )
    .await
    .map_err(SchedulingError::Database)?
    .ok_or_else(|| {
        SchedulingError::NotFound(format!("Release request with ID {} not found", id))
    })?;

    Ok(Json(updated.into_core().map_err(SchedulingError::Database)?))
}

/// Deletes a release request, permitted only while it is still pending.
#[axum::debug_handler]
pub async fn delete_release(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let current = examsync_db::repositories::release::get_release_request_by_id(&state.db_pool, id)
        .await
        .map_err(SchedulingError::Database)?
        .ok_or_else(|| {
            SchedulingError::NotFound(format!("Release request with ID {} not found", id))
        })?
        .into_core()
        .map_err(SchedulingError::Database)?;

    if current.status != ReleaseStatus::Pending {
        return Err(AppError(SchedulingError::InvalidState(format!(
            "only pending requests can be deleted, this one is {}",
            current.status.as_str()
        ))));
    }

    // The delete re-checks the status in SQL in case the request was
    // decided between the read and the write
    let deleted =
        examsync_db::repositories::release::delete_pending_release_request(&state.db_pool, id)
            .await
            .map_err(SchedulingError::Database)?;

    if !deleted {
        return Err(AppError(SchedulingError::InvalidState(
            "only pending requests can be deleted".to_string(),
        )));
    }

    Ok(Json(MessageResponse {
        message: "Release request deleted".to_string(),
    }))
}
