use crate::types::api::{PopupsResponse, SubmitEmailResponse};
use crate::types::popup::{PopupLogic, PopupType};
use chrono::{TimeZone, Utc};

#[test]
fn deserialize_popups_response() {
    let response = serde_json::from_value::<PopupsResponse>(serde_json::json!({
        "data": [
            {
                "id": 5,
                "popupLogic": "oneday-show-once",
                "popupType": "email-collector",
                "html": "{\"allow\": [\"www.fluv.com\"]}",
                "content": "Join us",
                "submitButtonText": "",
                "createdAt": "2025-06-01T00:00:00.000Z"
            },
            {
                "id": "6",
                "popupLogic": "weekly",
                "popupType": "video"
            },
            {
                "id": 7,
                "popupLogic": null
            }
        ]
    }))
    .unwrap();
    let popups = response.data;
    assert_eq!(popups.len(), 3);
    assert_eq!(popups[0].id, "5");
    assert_eq!(popups[0].popup_logic, PopupLogic::OnedayShowOnce);
    assert_eq!(popups[0].popup_type, PopupType::EmailCollector);
    assert_eq!(popups[0].submit_button_text, None);
    assert_eq!(
        popups[0].created_at,
        Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(popups[0].allowed_hosts(), vec!["www.fluv.com".to_owned()]);
    assert_eq!(popups[1].popup_logic, PopupLogic::Other("weekly".to_owned()));
    assert_eq!(popups[1].popup_type, PopupType::Image);
    assert!(popups[1].allowed_hosts().is_empty());
    assert_eq!(popups[2].popup_logic, PopupLogic::Always);
}

#[test]
fn popups_response_skips_malformed_popups() {
    let response = serde_json::from_value::<PopupsResponse>(serde_json::json!({
        "data": [
            "broken",
            {
                "id": 8,
                "html": { "allow": ["www.fluv.com"] }
            },
            {
                "id": 9,
                "html": "{\"allow\": [\"www.fluv.com\"]}"
            }
        ]
    }))
    .unwrap();
    let ids = response
        .data
        .iter()
        .map(|popup| popup.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["8", "9"]);
    assert!(response.data[0].allowed_hosts().is_empty());
    assert_eq!(
        response.data[1].allowed_hosts(),
        vec!["www.fluv.com".to_owned()]
    );
}

#[test]
fn popups_response_without_data() {
    let response = serde_json::from_value::<PopupsResponse>(serde_json::json!({})).unwrap();
    assert!(response.data.is_empty());
}

#[test]
fn deserialize_submit_email_response() {
    let response = serde_json::from_value::<SubmitEmailResponse>(serde_json::json!({
        "success": true,
        "successAction": "close"
    }))
    .unwrap();
    assert!(response.success);
    assert!(response.closes_popup());
    let response = serde_json::from_value::<SubmitEmailResponse>(serde_json::json!({
        "success": false,
        "error": "Invalid email"
    }))
    .unwrap();
    assert!(!response.closes_popup());
    assert_eq!(response.error, Some("Invalid email".to_owned()));
}
