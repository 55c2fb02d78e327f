pub mod availability;
pub mod conflict;
pub mod release;
pub mod report;

use axum::http::HeaderMap;
use examsync_core::errors::SchedulingError;
use uuid::Uuid;

/// Resolves the acting user from the `X-Actor-Id` header. The surrounding
/// platform authenticates requests upstream and forwards the caller's id
/// here; every state-changing operation stamps it into the audit fields.
pub fn actor_id(headers: &HeaderMap) -> Result<Uuid, SchedulingError> {
    let value = headers
        .get("x-actor-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SchedulingError::Validation("missing X-Actor-Id header".to_string()))?;

    Uuid::parse_str(value)
        .map_err(|_| SchedulingError::Validation("X-Actor-Id must be a UUID".to_string()))
}
