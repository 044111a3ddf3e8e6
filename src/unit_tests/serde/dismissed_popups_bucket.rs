use crate::types::dismissed_popups::DismissedPopupsBucket;
use chrono::{TimeZone, Utc};
use serde_test::{assert_tokens, Token};
use std::collections::HashMap;

#[test]
fn dismissed_popups_bucket() {
    assert_tokens(
        &DismissedPopupsBucket::new(HashMap::from([(
            "1".to_owned(),
            Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap(),
        )])),
        &[
            Token::Map { len: Some(1) },
            Token::Str("1"),
            Token::Str("2025-06-15T12:00:00Z"),
            Token::MapEnd,
        ],
    );
}

#[test]
fn dismissed_popups_bucket_legacy_record() {
    let bucket = serde_json::from_str::<DismissedPopupsBucket>(
        r#"{"3":"2025-06-14T23:10:00.123Z","9":"2025-01-01T00:00:00.000Z"}"#,
    )
    .unwrap();
    assert_eq!(bucket.ids(), vec!["3".to_owned(), "9".to_owned()]);
}
