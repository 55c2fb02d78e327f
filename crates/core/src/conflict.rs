//! Booking conflict check used by the booking subsystem before it commits
//! a new or rescheduled presentation.

use crate::errors::{SchedulingError, SchedulingResult};
use crate::models::booking::BookingWindow;
use crate::overlap::ranges_overlap;
use crate::validate::parse_minutes;

/// Checks a candidate booking against an examiner's existing bookings on
/// the same date.
///
/// The candidate end is `start_time + duration_minutes`; all arithmetic is
/// done in minutes since midnight so durations running past 23:59 still
/// compare correctly. Durations come straight off the query string, so the
/// additions are checked; an end past `u32::MAX` minutes is rejected as a
/// validation error rather than wrapping into a false "available". Returns
/// `Ok(false)` as soon as any existing booking intersects the candidate
/// under the half-open rule, `Ok(true)` when none does.
pub fn check_booking_conflict(
    start_time: &str,
    duration_minutes: u32,
    existing: &[BookingWindow],
) -> SchedulingResult<bool> {
    let candidate_start = u32::from(parse_minutes(start_time).ok_or_else(|| {
        SchedulingError::Validation(format!(
            "invalid start time '{start_time}', expected HH:MM"
        ))
    })?);
    let candidate_end = candidate_start
        .checked_add(duration_minutes)
        .ok_or_else(|| {
            SchedulingError::Validation(format!(
                "duration of {duration_minutes} minutes is out of range"
            ))
        })?;

    for booking in existing {
        let booked_start = u32::from(parse_minutes(&booking.start_time).ok_or_else(|| {
            SchedulingError::Validation(format!(
                "invalid booking start time '{}', expected HH:MM",
                booking.start_time
            ))
        })?);
        let booked_end = booked_start
            .checked_add(booking.duration_minutes)
            .ok_or_else(|| {
                SchedulingError::Validation(format!(
                    "booking duration of {} minutes is out of range",
                    booking.duration_minutes
                ))
            })?;

        if ranges_overlap(candidate_start, candidate_end, booked_start, booked_end) {
            return Ok(false);
        }
    }

    Ok(true)
}
