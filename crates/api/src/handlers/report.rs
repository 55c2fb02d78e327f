//! # Availability Report Handler
//!
//! Produces a per-examiner listing of slots inside an optional date range.
//! The `pdf` format currently serves the same JSON payload under a PDF
//! content type; rendering a real document is still pending on the
//! reporting side.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use examsync_core::{
    errors::SchedulingError,
    models::availability::AvailabilityReportEntry,
    paging, validate,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability report endpoint.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub examiner_id: Option<Uuid>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub format: Option<String>,
}

#[axum::debug_handler]
pub async fn availability_report(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
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

    let records = examsync_db::repositories::availability::list_records(
        &state.db_pool,
        query.examiner_id,
    )
    .await
    .map_err(SchedulingError::Database)?;

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let db_slots = examsync_db::repositories::availability::get_slots_by_record_id(
            &state.db_pool,
            record.id,
        )
        .await
        .map_err(SchedulingError::Database)?;

        let mut slots = Vec::with_capacity(db_slots.len());
        for db_slot in db_slots {
            slots.push(db_slot.into_core().map_err(SchedulingError::Database)?);
        }

        entries.push(AvailabilityReportEntry {
            examiner_id: record.examiner_id,
            examiner_name: record.examiner_name,
            slots: paging::filter_slots(slots, start_date, end_date, None),
        });
    }

    let response = if query.format.as_deref() == Some("pdf") {
        (
            [(header::CONTENT_TYPE, "application/pdf")],
            Json(entries),
        )
            .into_response()
    } else {
        Json(entries).into_response()
    };

    Ok(response)
}
