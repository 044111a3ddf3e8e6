use futures::FutureExt;
use serde::Serialize;

use crate::constants::CAROUSEL_AUTO_ADVANCE_INTERVAL;
use crate::models::carousel::Carousel;
use crate::models::common::{eq_update, fetch_active_events};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionCarousel, ActionLoad, Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Effects, Env, EnvFutureExt, UpdateWithCtx};
use crate::types::api::EventsRequest;
use crate::types::event::Event;

/// Home page banner carousel and the navbar events dropdown, both fed by
/// the same request. Only loaded in test mode.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventBanner {
    pub request: Option<EventsRequest>,
    /// Active events, `None` until the request resolves.
    pub events: Option<Vec<Event>>,
    pub carousel: Option<Carousel>,
}

impl EventBanner {
    /// The banner and the dropdown are hidden once loaded with nothing active.
    pub fn is_hidden(&self) -> bool {
        self.events
            .as_ref()
            .map(|events| events.is_empty())
            .unwrap_or_default()
    }
}

impl<E: Env + 'static> UpdateWithCtx<E> for EventBanner {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::EventBanner)) => {
                if !ctx.page.is_test_mode() {
                    return Effects::none().unchanged();
                }
                let request = EventsRequest::new(ctx.page.region());
                let request_effects = eq_update(&mut self.request, Some(request.to_owned()));
                let events_effects = eq_update(&mut self.events, None);
                let carousel_effects = eq_update(&mut self.carousel, None);
                Effects::one(fetch_active_events::<E>(&request, ctx.page.timezone()))
                    .unchanged()
                    .join(request_effects)
                    .join(events_effects)
                    .join(carousel_effects)
            }
            Msg::Internal(Internal::ActiveEventsResult(request, events))
                if self.request.as_ref() == Some(request) && self.events.is_none() =>
            {
                let carousel = Carousel::new(events);
                let auto_advance_effects = match &carousel {
                    Some(carousel) if carousel.has_controls() => {
                        Effects::one(auto_advance::<E>()).unchanged()
                    }
                    _ => Effects::none().unchanged(),
                };
                tracing::debug!(count = events.len(), "banner events loaded");
                eq_update(&mut self.events, Some(events.to_owned()))
                    .join(eq_update(&mut self.carousel, carousel))
                    .join(auto_advance_effects)
            }
            Msg::Action(Action::Carousel(action)) => match &mut self.carousel {
                Some(carousel) => {
                    let changed = match action {
                        ActionCarousel::Next => carousel.next(),
                        ActionCarousel::Prev => carousel.prev(),
                        ActionCarousel::SelectSlide(dot) => carousel.select(*dot),
                        ActionCarousel::TransitionEnd => carousel.transition_end(),
                    };
                    changed_effects(changed)
                }
                None => Effects::none().unchanged(),
            },
            Msg::Internal(Internal::CarouselAutoAdvance) => match &mut self.carousel {
                Some(carousel) if carousel.has_controls() => {
                    let changed = carousel.next();
                    Effects::one(auto_advance::<E>())
                        .unchanged()
                        .join(changed_effects(changed))
                }
                _ => Effects::none().unchanged(),
            },
            _ => Effects::none().unchanged(),
        }
    }
}

fn changed_effects(changed: bool) -> Effects {
    if changed {
        Effects::none()
    } else {
        Effects::none().unchanged()
    }
}

/// One tick of the repeating auto-advance timer, re-armed on every tick.
fn auto_advance<E: Env + 'static>() -> Effect {
    EffectFuture::Concurrent(
        E::sleep(CAROUSEL_AUTO_ADVANCE_INTERVAL)
            .map(|_| Msg::Internal(Internal::CarouselAutoAdvance))
            .boxed_env(),
    )
    .into()
}
