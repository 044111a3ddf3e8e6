use crate::constants::TEST_MODE_QUERY_PARAM;
use crate::types::page::Region;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

/// The page the widgets are mounted in.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
    pub hostname: String,
    /// Offset of the visitor's local time from UTC, in seconds.
    pub utc_offset: i32,
}

impl PageContext {
    pub fn new(url: &Url, utc_offset: i32) -> Self {
        Self {
            path: url.path().to_owned(),
            query: url.query().unwrap_or_default().to_owned(),
            hostname: url.host_str().unwrap_or_default().to_owned(),
            utc_offset,
        }
    }
    pub fn region(&self) -> Region {
        Region::from_path(&self.path)
    }
    /// Any `test` query parameter, with or without a value.
    pub fn is_test_mode(&self) -> bool {
        form_urlencoded::parse(self.query.as_bytes())
            .any(|(key, _)| key == TEST_MODE_QUERY_PARAM)
    }
    pub fn is_event_list_page(&self) -> bool {
        let path = self.path.to_lowercase();
        path.contains("/event-list/") || path.ends_with("/event-list")
    }
    /// Falls back to UTC when the offset is out of range.
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset).unwrap_or_else(|| Utc.fix())
    }
}
