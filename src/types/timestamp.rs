use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::str::FromStr;

const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const LOCAL_DATE_TIME_SERIALIZE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Point in time as sent by the API.
///
/// Date-times without an offset are wall clock times of the visitor, resolved
/// once the page offset is known. Plain dates are UTC midnight.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Timestamp {
    Absolute(DateTime<Utc>),
    Local(NaiveDateTime),
}

impl Timestamp {
    /// RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(value) {
            return Some(Timestamp::Absolute(date.with_timezone(&Utc)));
        }
        if let Some(date) = LOCAL_DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        {
            return Some(Timestamp::Local(date));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|date| Timestamp::Absolute(Utc.from_utc_datetime(&date)))
    }
    pub fn resolve(&self, timezone: &FixedOffset) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Absolute(date) => Some(*date),
            Timestamp::Local(date) => timezone
                .from_local_datetime(date)
                .single()
                .map(|date| date.with_timezone(&Utc)),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(date: DateTime<Utc>) -> Self {
        Timestamp::Absolute(date)
    }
}

impl FromStr for Timestamp {
    type Err = String;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(value).ok_or_else(|| format!("invalid timestamp {value}"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Timestamp::Absolute(date) => date.serialize(serializer),
            Timestamp::Local(date) => serializer
                .collect_str(&date.format(LOCAL_DATE_TIME_SERIALIZE_FORMAT)),
        }
    }
}
