use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability",
            post(handlers::availability::create_slots),
        )
        .route(
            "/api/availability/report",
            get(handlers::report::availability_report),
        )
        .route(
            "/api/availability/:examiner_id",
            get(handlers::availability::get_availability),
        )
        .route(
            "/api/availability/slots/:slot_id",
            put(handlers::availability::update_slot).delete(handlers::availability::delete_slot),
        )
        .route(
            "/api/availability/slots/:slot_id/status",
            patch(handlers::availability::toggle_slot_status),
        )
}
