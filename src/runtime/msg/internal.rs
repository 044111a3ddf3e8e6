use crate::models::ctx::WidgetError;
use crate::types::api::{EventsRequest, PopupsRequest, SubmitEmailRequest, SubmitEmailResponse};
use crate::types::event::Event;
use crate::types::popup::Popup;

//
// Those messages are meant to be dispatched and handled only inside the widgets crate
//
#[derive(Debug)]
pub enum Internal {
    /// Active events for the request, already filtered and sorted.
    /// Fetch failures arrive here as an empty list.
    ActiveEventsResult(EventsRequest, Vec<Event>),
    /// Result for loading the popup configuration.
    PopupsResult(PopupsRequest, Result<Vec<Popup>, WidgetError>),
    /// Result for posting an email from the email-collector popup.
    SubmitEmailResult(SubmitEmailRequest, Result<SubmitEmailResponse, WidgetError>),
    /// The carousel auto-advance timer fired.
    CarouselAutoAdvance,
    /// The delay after a successful email submission elapsed for the popup id.
    PopupAutoHide(String),
    /// Dispatched when a popup is closed or its email got accepted.
    DismissPopup(String),
    /// Dispatched when the dismissed popups record changed.
    DismissedPopupsChanged,
}
