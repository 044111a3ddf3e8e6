use serde::Deserialize;

#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionCarousel {
    Next,
    Prev,
    /// Jump to the real slide behind the given indicator dot (zero based).
    SelectSlide(usize),
    /// The track finished its translate animation.
    TransitionEnd,
}

#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum ActionPopup {
    /// Close control or image link clicked.
    Close,
    /// Floating reopen button clicked.
    Reopen,
    SubmitEmail(String),
}

#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(tag = "model", content = "args")]
pub enum ActionLoad {
    EventBanner,
    EventList,
    Popup,
}

/// Action messages
///
/// Those messages are meant to be dispatched only by the host page (the web
/// bridge or a test) and handled by the widget models.
#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(tag = "action", content = "args")]
pub enum Action {
    Load(ActionLoad),
    Carousel(ActionCarousel),
    Popup(ActionPopup),
}
