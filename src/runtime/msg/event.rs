use crate::models::ctx::WidgetError;
use serde::Serialize;

///
/// Those messages are meant to be dispatched by the widgets crate and
/// handled by the host page.
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "event", content = "args")]
pub enum Event {
    DismissedPopupsPushedToStorage {
        ids: Vec<String>,
    },
    PopupDismissed {
        id: String,
    },
    PopupEmailSubmitted {
        id: String,
    },
    Error {
        error: WidgetError,
        source: Box<Event>,
    },
}
