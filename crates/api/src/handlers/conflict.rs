//! # Conflict Check Handler
//!
//! The boundary contract toward the booking subsystem: before a
//! presentation is booked or rescheduled, the booking side asks whether a
//! candidate time window collides with the examiner's existing bookings.
//! This endpoint only reads booking data; persisting the booking stays on
//! the caller's side.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use examsync_core::{
    conflict,
    errors::SchedulingError,
    models::booking::{BookingWindow, ConflictCheckQuery, ConflictCheckResponse},
    validate,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Checks a candidate booking window against the examiner's bookings on
/// the requested date.
#[axum::debug_handler]
pub async fn check_booking_conflict(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ConflictCheckQuery>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    let date = validate::parse_date_param("date", &query.date)?;

    let bookings = examsync_db::repositories::booking::get_bookings_for_date(
        &state.db_pool,
        query.examiner_id,
        date,
    )
    .await
    .map_err(SchedulingError::Database)?;

    let windows: Vec<BookingWindow> = bookings
        .into_iter()
        .map(|b| BookingWindow {
            start_time: b.start_time,
            duration_minutes: b.duration_minutes.max(0) as u32,
        })
        .collect();

    let available =
        conflict::check_booking_conflict(&query.start_time, query.duration_minutes, &windows)?;

    Ok(Json(ConflictCheckResponse { available }))
}
