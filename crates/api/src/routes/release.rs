use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/duty-releases",
            post(handlers::release::create_release).get(handlers::release::list_releases),
        )
        .route(
            "/api/duty-releases/:id",
            get(handlers::release::get_release).delete(handlers::release::delete_release),
        )
        .route(
            "/api/duty-releases/:id/status",
            patch(handlers::release::set_release_status),
        )
}
