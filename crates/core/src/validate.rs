//! Parsing and validation of raw slot input.
//!
//! All clock times in the engine are zero-padded `"HH:MM"` strings. For
//! that format lexicographic string comparison agrees with numeric
//! comparison, so validated times can be ordered without re-parsing.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{SchedulingError, SchedulingResult};
use crate::models::availability::{RawSlot, SlotStatus, TimeSlot};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns true iff `s` is a strict two-digit `HH:MM` time between
/// `00:00` and `23:59`.
pub fn validate_time_format(s: &str) -> bool {
    parse_minutes(s).is_some()
}

/// Parses a strict `HH:MM` string into minutes since midnight.
pub fn parse_minutes(s: &str) -> Option<u16> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let digit = |b: u8| -> Option<u16> {
        if b.is_ascii_digit() {
            Some((b - b'0') as u16)
        } else {
            None
        }
    };
    let hours = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minutes = digit(bytes[3])? * 10 + digit(bytes[4])?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Validates a batch of raw slot entries and normalizes them into
/// `TimeSlot`s with fresh ids.
///
/// Fails fast on the first invalid entry, naming the entry and the rule it
/// violated. Entries without an explicit status default to `available`.
pub fn parse_and_validate_batch(raw_slots: &[RawSlot]) -> SchedulingResult<Vec<TimeSlot>> {
    let mut slots = Vec::with_capacity(raw_slots.len());

    for (index, raw) in raw_slots.iter().enumerate() {
        if !validate_time_format(&raw.start_time) {
            return Err(SchedulingError::Validation(format!(
                "slot {}: invalid start time '{}', expected HH:MM",
                index, raw.start_time
            )));
        }
        if !validate_time_format(&raw.end_time) {
            return Err(SchedulingError::Validation(format!(
                "slot {}: invalid end time '{}', expected HH:MM",
                index, raw.end_time
            )));
        }
        if raw.start_time >= raw.end_time {
            return Err(SchedulingError::Validation(format!(
                "slot {}: start time {} must be before end time {}",
                index, raw.start_time, raw.end_time
            )));
        }

        let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT).map_err(|_| {
            SchedulingError::Validation(format!(
                "slot {}: invalid date '{}', expected YYYY-MM-DD",
                index, raw.date
            ))
        })?;

        let status = match &raw.status {
            Some(s) => SlotStatus::parse(s).ok_or_else(|| {
                SchedulingError::Validation(format!("slot {}: unknown status '{}'", index, s))
            })?,
            None => SlotStatus::Available,
        };

        slots.push(TimeSlot {
            id: Uuid::new_v4(),
            date,
            start_time: raw.start_time.clone(),
            end_time: raw.end_time.clone(),
            status,
            notes: None,
            release_override: None,
        });
    }

    Ok(slots)
}

/// Parses a `YYYY-MM-DD` query parameter, reporting which field was bad.
pub fn parse_date_param(field: &str, value: &str) -> SchedulingResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        SchedulingError::Validation(format!(
            "invalid {field} '{value}', expected YYYY-MM-DD"
        ))
    })
}
