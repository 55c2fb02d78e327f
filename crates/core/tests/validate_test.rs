use pretty_assertions::assert_eq;
use rstest::rstest;

use examsync_core::errors::SchedulingError;
use examsync_core::models::availability::{RawSlot, SlotStatus};
use examsync_core::validate::{parse_and_validate_batch, parse_minutes, validate_time_format};

fn raw(date: &str, start: &str, end: &str, status: Option<&str>) -> RawSlot {
    RawSlot {
        date: date.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        status: status.map(|s| s.to_string()),
    }
}

#[rstest]
#[case("00:00")]
#[case("23:59")]
#[case("09:30")]
#[case("12:05")]
fn test_time_format_accepts_valid_times(#[case] input: &str) {
    assert!(validate_time_format(input), "expected '{}' to be valid", input);
}

#[rstest]
#[case("24:00")]
#[case("9:30")]
#[case("12:60")]
#[case("09-30")]
#[case("0930")]
#[case("09:3")]
#[case("ab:cd")]
#[case("")]
fn test_time_format_rejects_invalid_times(#[case] input: &str) {
    assert!(!validate_time_format(input), "expected '{}' to be invalid", input);
}

#[rstest]
#[case("00:00", 0)]
#[case("01:00", 60)]
#[case("09:30", 570)]
#[case("23:59", 1439)]
fn test_parse_minutes(#[case] input: &str, #[case] expected: u16) {
    assert_eq!(parse_minutes(input), Some(expected));
}

#[test]
fn test_batch_normalizes_valid_slots() {
    let batch = vec![
        raw("2024-03-20", "09:00", "10:00", None),
        raw("2024-03-21", "13:00", "14:30", Some("unavailable")),
    ];

    let slots = parse_and_validate_batch(&batch).expect("batch should validate");

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].status, SlotStatus::Available);
    assert_eq!(slots[0].start_time, "09:00");
    assert_eq!(slots[0].date.to_string(), "2024-03-20");
    assert_eq!(slots[1].status, SlotStatus::Unavailable);
    assert!(slots[0].notes.is_none());
    assert_ne!(slots[0].id, slots[1].id);
}

#[test]
fn test_batch_rejects_start_not_before_end() {
    let batch = vec![raw("2024-03-20", "10:00", "10:00", None)];

    let err = parse_and_validate_batch(&batch).unwrap_err();
    assert!(matches!(err, SchedulingError::Validation(_)));
    assert!(err.to_string().contains("before end time"));
}

#[test]
fn test_batch_rejects_invalid_calendar_date() {
    let batch = vec![raw("2024-02-30", "09:00", "10:00", None)];

    let err = parse_and_validate_batch(&batch).unwrap_err();
    assert!(matches!(err, SchedulingError::Validation(_)));
    assert!(err.to_string().contains("invalid date"));
}

#[test]
fn test_batch_rejects_unknown_status() {
    let batch = vec![raw("2024-03-20", "09:00", "10:00", Some("tentative"))];

    let err = parse_and_validate_batch(&batch).unwrap_err();
    assert!(err.to_string().contains("unknown status"));
}

#[test]
fn test_batch_fails_fast_and_identifies_the_entry() {
    let batch = vec![
        raw("2024-03-20", "09:00", "10:00", None),
        raw("2024-03-20", "9:30", "10:30", None),
        raw("2024-03-20", "25:00", "26:00", None),
    ];

    let err = parse_and_validate_batch(&batch).unwrap_err();
    // The second entry is the first offender and the only one reported
    assert!(err.to_string().contains("slot 1"));
    assert!(err.to_string().contains("9:30"));
}

#[test]
fn test_empty_batch_is_valid() {
    let slots = parse_and_validate_batch(&[]).expect("empty batch should validate");
    assert!(slots.is_empty());
}
