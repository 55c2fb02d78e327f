//! Interval overlap detection for slot batches.
//!
//! Intervals are half-open: a slot ending at 10:00 and a slot starting at
//! 10:00 do not overlap. The same predicate backs both batch detection
//! here and the booking conflict check in [`crate::conflict`].

use crate::models::availability::TimeSlot;

/// The half-open overlap predicate: two ranges intersect iff each starts
/// before the other ends. Touching endpoints never count as overlap.
pub fn ranges_overlap<T: Ord>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// Returns true iff any two slots in the batch share a date with
/// intersecting time ranges.
///
/// Works on a sorted copy ordered by (date, start_time) and scans adjacent
/// pairs, short-circuiting on the first hit. Sorting makes the result
/// independent of input order; with same-date slots ordered by start time,
/// any intersecting pair implies an intersecting adjacent pair.
pub fn detect_overlap(slots: &[TimeSlot]) -> bool {
    let mut sorted: Vec<&TimeSlot> = slots.iter().collect();
    sorted.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });

    sorted.windows(2).any(|pair| {
        pair[0].date == pair[1].date
            && ranges_overlap(
                pair[0].start_time.as_str(),
                pair[0].end_time.as_str(),
                pair[1].start_time.as_str(),
                pair[1].end_time.as_str(),
            )
    })
}
