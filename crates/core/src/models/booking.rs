use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An existing booking's time window, as read from the booking subsystem.
/// The engine never mutates bookings; it only compares against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWindow {
    pub start_time: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckQuery {
    pub examiner_id: Uuid,
    pub date: String,
    pub start_time: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub available: bool,
}
