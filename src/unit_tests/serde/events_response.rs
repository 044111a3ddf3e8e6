use crate::types::api::EventsResponse;

fn event_ids(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value::<EventsResponse>(value)
        .unwrap()
        .into_events()
        .into_iter()
        .map(|event| event.id)
        .collect()
}

#[test]
fn events_response() {
    assert_eq!(
        event_ids(serde_json::json!({ "events": [{ "id": 1 }, { "id": 2 }] })),
        vec!["1".to_owned(), "2".to_owned()]
    );
    assert_eq!(
        event_ids(serde_json::json!([{ "id": 3 }])),
        vec!["3".to_owned()]
    );
    assert!(event_ids(serde_json::json!({ "events": "none" })).is_empty());
    assert!(event_ids(serde_json::json!({ "message": "maintenance" })).is_empty());
    assert!(event_ids(serde_json::Value::Null).is_empty());
}

#[test]
fn events_response_skips_malformed_events() {
    assert_eq!(
        event_ids(serde_json::json!({
            "events": [
                { "id": 1, "title": "ok" },
                { "id": 2, "region": { "code": 1 }, "title": ["nested"] },
                "not an event",
                { "id": 4 }
            ]
        })),
        vec!["1".to_owned(), "2".to_owned(), "4".to_owned()]
    );
    assert_eq!(
        event_ids(serde_json::json!([42, { "id": 5 }])),
        vec!["5".to_owned()]
    );
}
