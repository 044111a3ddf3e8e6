use crate::types::event::Event;
use crate::types::popup::Popup;
use crate::types::lenient_vec;
use serde::{Deserialize, Serialize};

/// The events endpoint answers `{"events": [...]}` or a bare array. Any
/// other document is read as no events at all, a malformed event is skipped.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum EventsResponse {
    Wrapped {
        #[serde(deserialize_with = "lenient_vec")]
        events: Vec<Event>,
    },
    Bare(#[serde(deserialize_with = "lenient_vec")] Vec<Event>),
    Unexpected(serde_json::Value),
}

impl EventsResponse {
    pub fn into_events(self) -> Vec<Event> {
        match self {
            EventsResponse::Wrapped { events } | EventsResponse::Bare(events) => events,
            EventsResponse::Unexpected(_) => vec![],
        }
    }
}

#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
pub struct PopupsResponse {
    /// Malformed popups are skipped.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub data: Vec<Popup>,
}

#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEmailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub success_action: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SubmitEmailResponse {
    /// The server asks for the popup to close right away instead of showing
    /// the success message.
    pub fn closes_popup(&self) -> bool {
        self.success_action.as_deref() == Some("close")
    }
}
