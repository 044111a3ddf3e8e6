use crate::types::{empty_string_as_none, lenient_utc_timestamp, number_or_string};
use chrono::{DateTime, Utc};
use derivative::Derivative;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How often a popup may come back after the visitor closed it.
#[derive(Derivative, Clone, PartialEq, Eq, Debug)]
#[derivative(Default)]
pub enum PopupLogic {
    /// Never again once closed.
    ShowOnce,
    /// Not again on the calendar day it was closed.
    OnedayShowOnce,
    /// On every page load.
    #[derivative(Default)]
    Always,
    /// Unrecognised values behave like [`PopupLogic::Always`].
    Other(String),
}

impl PopupLogic {
    pub fn as_str(&self) -> &str {
        match self {
            PopupLogic::ShowOnce => "show-once",
            PopupLogic::OnedayShowOnce => "oneday-show-once",
            PopupLogic::Always => "default",
            PopupLogic::Other(value) => value,
        }
    }
}

impl From<String> for PopupLogic {
    fn from(value: String) -> Self {
        match value.as_str() {
            "show-once" => PopupLogic::ShowOnce,
            "oneday-show-once" => PopupLogic::OnedayShowOnce,
            "default" => PopupLogic::Always,
            _ => PopupLogic::Other(value),
        }
    }
}

impl Serialize for PopupLogic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PopupLogic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?
            .map(PopupLogic::from)
            .unwrap_or_default())
    }
}

#[derive(Derivative, Clone, Copy, PartialEq, Eq, Debug)]
#[derivative(Default)]
pub enum PopupType {
    #[derivative(Default)]
    Image,
    EmailCollector,
}

impl PopupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopupType::Image => "image",
            PopupType::EmailCollector => "email-collector",
        }
    }
}

impl Serialize for PopupType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PopupType {
    /// Everything but `email-collector` renders as an image popup.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)?.as_deref() {
            Some("email-collector") => PopupType::EmailCollector,
            _ => PopupType::Image,
        })
    }
}

#[derive(Deserialize)]
struct HostAllowList {
    allow: Vec<String>,
}

#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    #[serde(default, deserialize_with = "number_or_string")]
    pub id: String,
    #[serde(default)]
    pub popup_logic: PopupLogic,
    #[serde(default)]
    pub popup_type: PopupType,
    /// JSON document `{"allow": [hostname, ...]}`.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub html: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub submit_button_text: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub reopen_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_utc_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Popup {
    /// Hostnames from the `html` allow-list. Empty when missing or malformed.
    pub fn allowed_hosts(&self) -> Vec<String> {
        self.html
            .as_deref()
            .and_then(|html| serde_json::from_str::<HostAllowList>(html).ok())
            .map(|allow_list| allow_list.allow)
            .unwrap_or_default()
    }
    pub fn allows_host(&self, hostname: &str) -> bool {
        self.allowed_hosts().iter().any(|host| host == hostname)
    }
}

/// The newest popup whose allow-list contains `hostname`.
pub fn select_popup_for_host<'a>(popups: &'a [Popup], hostname: &str) -> Option<&'a Popup> {
    popups
        .iter()
        .filter(|popup| popup.allows_host(hostname))
        .sorted_by(|a, b| b.created_at.cmp(&a.created_at))
        .next()
}
