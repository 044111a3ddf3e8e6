use crate::constants::{
    DEFAULT_REOPEN_IMAGE_URL, DEFAULT_SUBMIT_BUTTON_TEXT, EMAIL_INPUT_PLACEHOLDER,
    POPUP_DECORATION_IMAGE_URL, SUBMITTING_BUTTON_TEXT,
};
use crate::models::common::Loadable;
use crate::models::ctx::OtherError;
use crate::models::popup::{EmailForm, PromoPopup, SelectedPopup};
use crate::runtime::msg::{Action, ActionPopup};
use crate::types::popup::{Popup, PopupType};
use crate::view::{Element, Handler, Mount, Node};

pub const POPUP_OVERLAY_ID: &str = "fluv-popup-overlay";
pub const POPUP_ID: &str = "fluv-popup";
pub const REOPEN_BUTTON_ID: &str = "reopen-popup";
pub const EMAIL_INPUT_ID: &str = "popup-email-input";

pub struct ImagePopupProps<'a> {
    pub image_link: &'a str,
    pub image: &'a str,
}

impl<'a> TryFrom<&'a Popup> for ImagePopupProps<'a> {
    type Error = OtherError;
    fn try_from(popup: &'a Popup) -> Result<Self, Self::Error> {
        Ok(Self {
            image_link: popup
                .image_link
                .as_deref()
                .ok_or(OtherError::MissingProp("imageLink"))?,
            image: popup
                .image
                .as_deref()
                .ok_or(OtherError::MissingProp("image"))?,
        })
    }
}

pub struct EmailPopupProps<'a> {
    pub content: &'a str,
    pub submit_button_text: &'a str,
    pub form: &'a EmailForm,
}

impl<'a> From<&'a SelectedPopup> for EmailPopupProps<'a> {
    fn from(selected: &'a SelectedPopup) -> Self {
        Self {
            content: selected.popup.content.as_deref().unwrap_or_default(),
            submit_button_text: selected
                .popup
                .submit_button_text
                .as_deref()
                .unwrap_or(DEFAULT_SUBMIT_BUTTON_TEXT),
            form: &selected.form,
        }
    }
}

/// Overlay, popup and reopen button, in that order. Nothing before a popup
/// got selected.
pub fn render_popup(promo_popup: &PromoPopup) -> Vec<Mount> {
    let selected = match &promo_popup.selected {
        Some(Loadable::Ready(Some(selected))) => selected,
        _ => return vec![],
    };
    let display = if selected.is_open { "block" } else { "none" };
    let content = match selected.popup.popup_type {
        PopupType::Image => match ImagePopupProps::try_from(&selected.popup) {
            Ok(props) => image_popup_content(props),
            Err(error) => {
                tracing::debug!(%error, id = %selected.popup.id, "image popup not rendered");
                vec![]
            }
        },
        PopupType::EmailCollector => email_popup_content(EmailPopupProps::from(selected)),
    };
    let overlay = Element::new("div")
        .id(POPUP_OVERLAY_ID)
        .style("display", display)
        .styles(&[
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100vw"),
            ("height", "100vh"),
            ("background", "rgba(0, 0, 0, 0.5)"),
            ("z-index", "9998"),
        ]);
    let popup = Element::new("div")
        .id(POPUP_ID)
        .style("display", display)
        .styles(&[
            ("position", "fixed"),
            ("top", "50%"),
            ("left", "50%"),
            ("transform", "translate(-50%, -50%)"),
            ("background", "white"),
            ("padding", "30px 20px 20px"),
            ("border-radius", "12px"),
            ("box-shadow", "0 2px 20px rgba(0, 0, 0, 0.18)"),
            ("z-index", "9999"),
            ("width", "420px"),
            ("max-width", "95%"),
            ("text-align", "center"),
        ])
        .children(content);
    let reopen_image = selected
        .popup
        .reopen_image
        .to_owned()
        .unwrap_or_else(|| DEFAULT_REOPEN_IMAGE_URL.to_string());
    let reopen_button = Element::new("button")
        .id(REOPEN_BUTTON_ID)
        .style("display", if selected.is_open { "none" } else { "block" })
        .styles(&[
            ("position", "fixed"),
            ("right", "20px"),
            ("bottom", "80px"),
            ("width", "120px"),
            ("height", "120px"),
            ("background", "transparent"),
            ("border", "none"),
            ("padding", "0"),
            ("cursor", "pointer"),
            ("z-index", "10000"),
        ])
        .on(Handler::Click(Action::Popup(ActionPopup::Reopen)))
        .child(
            Element::new("img")
                .attr("src", reopen_image)
                .attr("alt", "reopen gif")
                .styles(&[
                    ("width", "100%"),
                    ("height", "100%"),
                    ("object-fit", "contain"),
                ]),
        );
    vec![
        Mount::Owned(overlay),
        Mount::Owned(popup),
        Mount::Owned(reopen_button),
    ]
}

fn close_button() -> Node {
    Element::new("button")
        .id("close-popup")
        .styles(&[
            ("position", "absolute"),
            ("top", "15px"),
            ("right", "15px"),
            ("width", "30px"),
            ("height", "30px"),
            ("padding", "unset"),
            ("border-radius", "50%"),
            ("background", "transparent"),
            ("border", "none"),
            ("font-size", "20px"),
            ("cursor", "pointer"),
            ("z-index", "2"),
        ])
        .text("\u{2716}\u{fe0f}")
        .on(Handler::Click(Action::Popup(ActionPopup::Close)))
        .into()
}

fn decoration_image() -> Node {
    Element::new("img")
        .attr("src", POPUP_DECORATION_IMAGE_URL.as_str())
        .attr("alt", "Popup Cat")
        .styles(&[
            ("position", "absolute"),
            ("bottom", "0px"),
            ("left", "-34px"),
            ("transform", "translateX(-50%)"),
            ("width", "200px"),
            ("height", "auto"),
            ("z-index", "1"),
        ])
        .into()
}

fn image_popup_content(props: ImagePopupProps) -> Vec<Node> {
    vec![
        close_button(),
        decoration_image(),
        Element::new("a")
            .id("popup-image-link")
            .attr("href", props.image_link)
            .attr("target", "_blank")
            .styles(&[("display", "block"), ("margin-top", "20px")])
            .on(Handler::Click(Action::Popup(ActionPopup::Close)))
            .child(
                Element::new("img")
                    .attr("src", props.image)
                    .attr("alt", "Popup Main")
                    .styles(&[
                        ("width", "100%"),
                        ("height", "auto"),
                        ("border-radius", "10px"),
                        ("cursor", "pointer"),
                    ]),
            )
            .into(),
    ]
}

fn email_popup_content(props: EmailPopupProps) -> Vec<Node> {
    let form_container = Element::new("div")
        .id("popup-form-container")
        .style("margin-top", "20px");
    let form_container = match props.form {
        EmailForm::Succeeded { message } => form_container.child(
            Element::new("div")
                .styles(&[("text-align", "center"), ("padding", "20px")])
                .child(
                    Element::new("div")
                        .styles(&[("font-size", "48px"), ("margin-bottom", "10px")])
                        .text("\u{2705}"),
                )
                .child(
                    Element::new("div")
                        .styles(&[("font-size", "16px"), ("color", "#333")])
                        .text(message.to_owned().unwrap_or_default()),
                ),
        ),
        form => {
            let submitting = matches!(form, EmailForm::Submitting { .. });
            let submit_button = Element::new("button")
                .id("popup-submit-btn")
                .attr("type", "submit")
                .styles(&[
                    ("padding", "12px 24px"),
                    ("background-color", "#007bff"),
                    ("color", "white"),
                    ("border", "none"),
                    ("border-radius", "8px"),
                    ("font-size", "16px"),
                    ("cursor", "pointer"),
                ])
                .text(if submitting {
                    SUBMITTING_BUTTON_TEXT
                } else {
                    props.submit_button_text
                });
            let submit_button = if submitting {
                submit_button.attr("disabled", "")
            } else {
                submit_button
            };
            let email_form = Element::new("form")
                .id("popup-email-form")
                .styles(&[
                    ("display", "flex"),
                    ("flex-direction", "column"),
                    ("gap", "12px"),
                ])
                .on(Handler::SubmitEmail)
                .child(
                    Element::new("input")
                        .id(EMAIL_INPUT_ID)
                        .attr("type", "email")
                        .attr("placeholder", EMAIL_INPUT_PLACEHOLDER)
                        .attr("required", "")
                        .styles(&[
                            ("padding", "12px 16px"),
                            ("border", "1px solid #ddd"),
                            ("border-radius", "8px"),
                            ("font-size", "14px"),
                            ("outline", "none"),
                        ]),
                )
                .child(submit_button)
                .child(email_error(match form {
                    EmailForm::Failed { message } => Some(message),
                    _ => None,
                }));
            form_container
                .child(
                    Element::new("div")
                        .styles(&[
                            ("font-size", "16px"),
                            ("line-height", "1.6"),
                            ("color", "#333"),
                            ("margin-bottom", "20px"),
                            ("white-space", "pre-wrap"),
                            ("text-align", "left"),
                            ("padding", "0 10px"),
                        ])
                        .text(props.content),
                )
                .child(email_form)
        }
    };
    vec![close_button(), decoration_image(), form_container.into()]
}

/// Kept in the form in every state so the typed email survives a failed
/// submission.
fn email_error(message: Option<&String>) -> Element {
    Element::new("p")
        .id("popup-email-error")
        .styles(&[("color", "#d33"), ("font-size", "14px"), ("margin", "0")])
        .style("display", if message.is_some() { "block" } else { "none" })
        .text(message.cloned().unwrap_or_default())
}
