use crate::types::page::Region;
use crate::types::{
    empty_string_as_none, lenient_region, lenient_timestamp, number_or_string, Timestamp,
};
use chrono::{DateTime, FixedOffset, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A marketing event as served by the events endpoint.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, deserialize_with = "number_or_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_region")]
    pub region: Option<u8>,
    /// `None` when the API value could not be parsed.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_time: Option<Timestamp>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub home_banner_utm_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub mobile_image_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub desktop_image_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub bar_utm_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub event_page_utm_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub tab_name: Option<String>,
}

impl Event {
    /// Region matches and `start_time <= now <= end_time`, both bounds valid.
    /// Wall clock times are read in `timezone`.
    pub fn is_active(&self, region: Region, now: DateTime<Utc>, timezone: &FixedOffset) -> bool {
        if self.region != Some(region.code()) {
            return false;
        }
        match (self.start_time_in(timezone), self.end_time_in(timezone)) {
            (Some(start_time), Some(end_time)) => start_time <= now && now <= end_time,
            _ => false,
        }
    }
    pub fn start_time_in(&self, timezone: &FixedOffset) -> Option<DateTime<Utc>> {
        self.start_time
            .as_ref()
            .and_then(|time| time.resolve(timezone))
    }
    pub fn end_time_in(&self, timezone: &FixedOffset) -> Option<DateTime<Utc>> {
        self.end_time.as_ref().and_then(|time| time.resolve(timezone))
    }
}

/// Keeps the active events, most recently started first.
pub fn active_events(
    events: Vec<Event>,
    region: Region,
    now: DateTime<Utc>,
    timezone: &FixedOffset,
) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| event.is_active(region, now, timezone))
        .sorted_by(|a, b| b.start_time_in(timezone).cmp(&a.start_time_in(timezone)))
        .collect()
}
