use enclose::enclose;
use futures::{future, FutureExt, TryFutureExt};
use serde::Serialize;

use crate::constants::{POPUP_SUCCESS_HIDE_DELAY, SUBMIT_EMAIL_FAILED_MESSAGE};
use crate::models::common::{eq_update, Loadable};
use crate::models::ctx::{Ctx, OtherError, WidgetError};
use crate::runtime::msg::{Action, ActionLoad, ActionPopup, Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx};
use crate::types::api::{
    fetch_api, PopupsRequest, PopupsResponse, SubmitEmailRequest, SubmitEmailResponse,
};
use crate::types::popup::{select_popup_for_host, Popup, PopupType};

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(tag = "type", content = "content")]
pub enum EmailForm {
    Idle,
    /// Request in flight, the form is disabled.
    Submitting { email: String },
    Succeeded { message: Option<String> },
    Failed { message: String },
}

#[derive(Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPopup {
    pub popup: Popup,
    /// Popup and overlay are displayed, otherwise only the reopen button is.
    pub is_open: bool,
    pub form: EmailForm,
}

impl SelectedPopup {
    fn new(popup: Popup, is_open: bool) -> Self {
        Self {
            popup,
            is_open,
            form: EmailForm::Idle,
        }
    }
}

/// Promotional popup picked for the current hostname.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromoPopup {
    pub request: Option<PopupsRequest>,
    /// `Ready(None)` when no popup targets this hostname.
    pub selected: Option<Loadable<Option<SelectedPopup>, WidgetError>>,
}

impl PromoPopup {
    fn selected_mut(&mut self) -> Option<&mut SelectedPopup> {
        match &mut self.selected {
            Some(Loadable::Ready(Some(selected))) => Some(selected),
            _ => None,
        }
    }
}

impl<E: Env + 'static> UpdateWithCtx<E> for PromoPopup {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::Popup)) => {
                let request = PopupsRequest {
                    region: ctx.page.region(),
                    test: ctx.page.is_test_mode(),
                };
                let request_effects = eq_update(&mut self.request, Some(request.to_owned()));
                let selected_effects = eq_update(&mut self.selected, Some(Loadable::Loading));
                Effects::one(fetch_popups::<E>(&request))
                    .unchanged()
                    .join(request_effects)
                    .join(selected_effects)
            }
            Msg::Internal(Internal::PopupsResult(request, result))
                if self.request.as_ref() == Some(request)
                    && matches!(self.selected, Some(Loadable::Loading)) =>
            {
                let next_selected = match result {
                    Ok(popups) => {
                        let selected = select_popup_for_host(popups, &ctx.page.hostname).map(
                            |popup| {
                                let is_open = request.test
                                    || ctx.dismissed_popups.should_show(
                                        popup,
                                        E::now(),
                                        &ctx.page.timezone(),
                                    );
                                SelectedPopup::new(popup.to_owned(), is_open)
                            },
                        );
                        tracing::debug!(
                            id = selected.as_ref().map(|selected| selected.popup.id.as_str()),
                            "popup selected"
                        );
                        Loadable::Ready(selected)
                    }
                    Err(error) => {
                        tracing::warn!(%error, "popups fetch failed");
                        Loadable::Err(error.to_owned())
                    }
                };
                eq_update(&mut self.selected, Some(next_selected))
            }
            Msg::Action(Action::Popup(ActionPopup::Close)) => match self.selected_mut() {
                Some(selected) if selected.is_open => {
                    selected.is_open = false;
                    Effects::msg(Msg::Internal(Internal::DismissPopup(
                        selected.popup.id.to_owned(),
                    )))
                }
                _ => Effects::none().unchanged(),
            },
            Msg::Action(Action::Popup(ActionPopup::Reopen)) => match self.selected_mut() {
                Some(selected) => eq_update(&mut selected.is_open, true),
                None => Effects::none().unchanged(),
            },
            Msg::Action(Action::Popup(ActionPopup::SubmitEmail(email))) => {
                match self.selected_mut() {
                    Some(selected)
                        if selected.is_open
                            && selected.popup.popup_type == PopupType::EmailCollector
                            && matches!(
                                selected.form,
                                EmailForm::Idle | EmailForm::Failed { .. }
                            )
                            && !email.trim().is_empty() =>
                    {
                        let email = email.trim().to_owned();
                        let request = SubmitEmailRequest {
                            popup_id: selected.popup.id.to_owned(),
                            email: email.to_owned(),
                        };
                        selected.form = EmailForm::Submitting { email };
                        Effects::one(submit_email::<E>(&request))
                    }
                    _ => Effects::none().unchanged(),
                }
            }
            Msg::Internal(Internal::SubmitEmailResult(request, result)) => {
                match self.selected_mut() {
                    Some(selected)
                        if selected.popup.id == request.popup_id
                            && selected.form
                                == (EmailForm::Submitting {
                                    email: request.email.to_owned(),
                                }) =>
                    {
                        match result {
                            Ok(response) => {
                                let id = selected.popup.id.to_owned();
                                selected.form = EmailForm::Succeeded {
                                    message: response.message.to_owned(),
                                };
                                let hide_effects = if response.closes_popup() {
                                    selected.is_open = false;
                                    Effects::none()
                                } else {
                                    Effects::one(auto_hide::<E>(&id))
                                };
                                Effects::msgs(vec![
                                    Msg::Internal(Internal::DismissPopup(id.to_owned())),
                                    Msg::Event(Event::PopupEmailSubmitted { id }),
                                ])
                                .join(hide_effects)
                            }
                            Err(error) => {
                                tracing::warn!(%error, id = %request.popup_id, "email submission failed");
                                let message = match error {
                                    WidgetError::Other(OtherError::EmailSubmissionRejected(
                                        Some(message),
                                    )) => message.to_owned(),
                                    _ => SUBMIT_EMAIL_FAILED_MESSAGE.to_owned(),
                                };
                                selected.form = EmailForm::Failed { message };
                                Effects::none()
                            }
                        }
                    }
                    _ => Effects::none().unchanged(),
                }
            }
            Msg::Internal(Internal::PopupAutoHide(id)) => match self.selected_mut() {
                Some(selected)
                    if selected.popup.id == *id
                        && matches!(selected.form, EmailForm::Succeeded { .. }) =>
                {
                    eq_update(&mut selected.is_open, false)
                }
                _ => Effects::none().unchanged(),
            },
            _ => Effects::none().unchanged(),
        }
    }
}

fn fetch_popups<E: Env + 'static>(request: &PopupsRequest) -> Effect {
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, PopupsResponse>(request)
            .map_ok(|response| response.data)
            .map_err(WidgetError::from)
            .map(enclose!((request.to_owned() => request) move |result| {
                Msg::Internal(Internal::PopupsResult(request, result))
            }))
            .boxed_env(),
    )
    .into()
}

fn submit_email<E: Env + 'static>(request: &SubmitEmailRequest) -> Effect {
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, SubmitEmailResponse>(request)
            .map_err(WidgetError::from)
            .and_then(|response: SubmitEmailResponse| {
                if response.success {
                    future::ok(response)
                } else {
                    future::err(WidgetError::from(OtherError::EmailSubmissionRejected(
                        response.error,
                    )))
                }
            })
            .map(enclose!((request.to_owned() => request) move |result| {
                Msg::Internal(Internal::SubmitEmailResult(request, result))
            }))
            .boxed_env(),
    )
    .into()
}

fn auto_hide<E: Env + 'static>(id: &str) -> Effect {
    let id = id.to_owned();
    EffectFuture::Concurrent(
        E::sleep(POPUP_SUCCESS_HIDE_DELAY)
            .map(move |_| Msg::Internal(Internal::PopupAutoHide(id)))
            .boxed_env(),
    )
    .into()
}
