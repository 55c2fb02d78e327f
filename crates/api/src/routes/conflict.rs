use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/bookings/conflict-check",
        get(handlers::conflict::check_booking_conflict),
    )
}
