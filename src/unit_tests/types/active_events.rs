use crate::types::event::{active_events, Event};
use crate::types::page::Region;
use crate::unit_tests::event;
use crate::types::Timestamp;
use crate::unit_tests::TAIPEI_UTC_OFFSET;
use chrono::{DateTime, FixedOffset, Utc};

fn now() -> DateTime<Utc> {
    "2025-06-15T12:00:00Z".parse().unwrap()
}

fn taipei() -> FixedOffset {
    FixedOffset::east_opt(TAIPEI_UTC_OFFSET).unwrap()
}

#[test]
fn active_window_is_inclusive() {
    let starts_now = event("1", 1, "2025-06-15T12:00:00Z", "2025-06-20T00:00:00Z");
    let ends_now = event("2", 1, "2025-06-01T00:00:00Z", "2025-06-15T12:00:00Z");
    assert!(starts_now.is_active(Region::Taiwan, now(), &taipei()));
    assert!(ends_now.is_active(Region::Taiwan, now(), &taipei()));
    assert!(!ends_now.is_active(Region::Japan, now(), &taipei()));
}

#[test]
fn invalid_window_is_never_active() {
    let no_end = Event {
        end_time: None,
        ..event("1", 1, "2025-06-01T00:00:00Z", "2025-06-20T00:00:00Z")
    };
    let no_region = Event {
        region: None,
        ..event("2", 1, "2025-06-01T00:00:00Z", "2025-06-20T00:00:00Z")
    };
    assert!(!no_end.is_active(Region::Taiwan, now(), &taipei()));
    assert!(!no_region.is_active(Region::Taiwan, now(), &taipei()));
}

#[test]
fn active_events_sorted_by_start_descending() {
    let events = vec![
        event("a", 1, "2025-06-01T00:00:00Z", "2025-06-30T00:00:00Z"),
        event("b", 1, "2025-06-10T00:00:00Z", "2025-06-30T00:00:00Z"),
        event("c", 3, "2025-06-12T00:00:00Z", "2025-06-30T00:00:00Z"),
        event("d", 1, "2025-06-01T00:00:00Z", "2025-06-30T00:00:00Z"),
        event("e", 1, "2025-06-16T00:00:00Z", "2025-06-30T00:00:00Z"),
    ];
    let ids = active_events(events, Region::Taiwan, now(), &taipei())
        .into_iter()
        .map(|event| event.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["b", "a", "d"], "Ties should keep the API order");
}

#[test]
fn wall_clock_window_read_in_page_timezone() {
    // 12:00Z is 20:00 in Taipei
    let event = Event {
        start_time: Some("2025-06-15 20:00:00".parse::<Timestamp>().unwrap()),
        end_time: Some("2025-06-15T21:00:00".parse::<Timestamp>().unwrap()),
        ..event("1", 1, "2025-06-01T00:00:00Z", "2025-06-20T00:00:00Z")
    };
    assert!(event.is_active(Region::Taiwan, now(), &taipei()));
    let utc = FixedOffset::east_opt(0).unwrap();
    assert!(
        !event.is_active(Region::Taiwan, now(), &utc),
        "Wall clock times should follow the page offset"
    );
}

#[test]
fn wall_clock_start_times_sorted_after_resolution() {
    let events = vec![
        Event {
            start_time: Some("2025-06-15T09:00:00".parse::<Timestamp>().unwrap()),
            ..event("local", 1, "2025-06-01T00:00:00Z", "2025-06-30T00:00:00Z")
        },
        event("absolute", 1, "2025-06-15T02:00:00Z", "2025-06-30T00:00:00Z"),
    ];
    let ids = active_events(events, Region::Taiwan, now(), &taipei())
        .into_iter()
        .map(|event| event.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["absolute", "local"]);
}
