use futures::FutureExt;

use crate::constants::DISMISSED_POPUPS_STORAGE_KEY;
use crate::models::ctx::WidgetError;
use crate::runtime::msg::{Event, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt};
use crate::types::dismissed_popups::DismissedPopupsBucket;

pub fn update_dismissed_popups<E: Env + 'static>(
    dismissed_popups: &mut DismissedPopupsBucket,
    msg: &Msg,
) -> Effects {
    match msg {
        Msg::Internal(Internal::DismissPopup(id)) => {
            dismissed_popups.dismiss(id, E::now());
            Effects::msgs(vec![
                Msg::Internal(Internal::DismissedPopupsChanged),
                Msg::Event(Event::PopupDismissed { id: id.to_owned() }),
            ])
        }
        Msg::Internal(Internal::DismissedPopupsChanged) => {
            Effects::one(push_dismissed_popups_to_storage::<E>(dismissed_popups)).unchanged()
        }
        _ => Effects::none().unchanged(),
    }
}

fn push_dismissed_popups_to_storage<E: Env + 'static>(
    dismissed_popups: &DismissedPopupsBucket,
) -> Effect {
    let ids = dismissed_popups.ids();
    EffectFuture::Sequential(
        E::set_storage(DISMISSED_POPUPS_STORAGE_KEY, Some(dismissed_popups))
            .map(move |result| match result {
                Ok(_) => Msg::Event(Event::DismissedPopupsPushedToStorage { ids }),
                Err(error) => {
                    tracing::warn!(%error, "dismissed popups were not persisted");
                    Msg::Event(Event::Error {
                        error: WidgetError::from(error),
                        source: Box::new(Event::DismissedPopupsPushedToStorage { ids }),
                    })
                }
            })
            .boxed_env(),
    )
    .into()
}
