use crate::constants::{API_URL, EVENTS_LIMIT, URI_COMPONENT_ENCODE_SET};
use crate::types::page::Region;
use http::Method;
use percent_encoding::utf8_percent_encode;
use serde::Serialize;
use std::ops::Not;
use url::Url;

pub trait FetchRequestParams<T> {
    fn endpoint(&self) -> Url;
    fn method(&self) -> Method;
    fn path(&self) -> String;
    fn query(&self) -> Option<String>;
    fn body(self) -> T;
    /// Whether an answer with a non-2xx status is still decoded.
    fn decodes_error_status(&self) -> bool {
        false
    }
}

/// `GET /events?limit=100&region={code}`
#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct EventsRequest {
    pub limit: usize,
    pub region: Region,
}

impl EventsRequest {
    pub fn new(region: Region) -> Self {
        Self {
            limit: EVENTS_LIMIT,
            region,
        }
    }
}

impl FetchRequestParams<()> for EventsRequest {
    fn endpoint(&self) -> Url {
        API_URL.to_owned()
    }
    fn method(&self) -> Method {
        Method::GET
    }
    fn path(&self) -> String {
        "events".to_owned()
    }
    fn query(&self) -> Option<String> {
        Some(serde_url_params::to_string(&self).expect("Serialize query params failed"))
    }
    fn body(self) {}
}

/// `GET /popups/active?region={code}[&test=true]`
#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct PopupsRequest {
    pub region: Region,
    #[serde(skip_serializing_if = "Not::not")]
    pub test: bool,
}

impl FetchRequestParams<()> for PopupsRequest {
    fn endpoint(&self) -> Url {
        API_URL.to_owned()
    }
    fn method(&self) -> Method {
        Method::GET
    }
    fn path(&self) -> String {
        "popups/active".to_owned()
    }
    fn query(&self) -> Option<String> {
        Some(serde_url_params::to_string(&self).expect("Serialize query params failed"))
    }
    fn body(self) {}
}

/// `POST /popups/{id}/submit-email` with body `{"email": ...}`
#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
pub struct SubmitEmailRequest {
    #[serde(skip)]
    pub popup_id: String,
    pub email: String,
}

impl FetchRequestParams<SubmitEmailRequest> for SubmitEmailRequest {
    fn endpoint(&self) -> Url {
        API_URL.to_owned()
    }
    fn method(&self) -> Method {
        Method::POST
    }
    fn path(&self) -> String {
        format!(
            "popups/{}/submit-email",
            utf8_percent_encode(&self.popup_id, URI_COMPONENT_ENCODE_SET)
        )
    }
    fn query(&self) -> Option<String> {
        None
    }
    fn body(self) -> SubmitEmailRequest {
        self
    }
    fn decodes_error_status(&self) -> bool {
        true
    }
}
