use serde::Serialize;

use crate::models::common::{eq_update, fetch_active_events};
use crate::models::ctx::Ctx;
use crate::runtime::msg::{Action, ActionLoad, Internal, Msg};
use crate::runtime::{Effects, Env, UpdateWithCtx};
use crate::types::api::EventsRequest;
use crate::types::event::Event;

/// Cards of the `/event-list` page plus the events submenu of the site menu.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventList {
    /// The legacy list block is hidden whenever test mode is on.
    pub hide_legacy_list: bool,
    pub request: Option<EventsRequest>,
    /// Active events, `None` until the request resolves.
    pub events: Option<Vec<Event>>,
}

impl<E: Env + 'static> UpdateWithCtx<E> for EventList {
    fn update(&mut self, msg: &Msg, ctx: &Ctx) -> Effects {
        match msg {
            Msg::Action(Action::Load(ActionLoad::EventList)) => {
                if !ctx.page.is_test_mode() {
                    return Effects::none().unchanged();
                }
                let hide_legacy_list_effects = eq_update(&mut self.hide_legacy_list, true);
                if !ctx.page.is_event_list_page() {
                    return hide_legacy_list_effects;
                }
                let request = EventsRequest::new(ctx.page.region());
                let request_effects = eq_update(&mut self.request, Some(request.to_owned()));
                let events_effects = eq_update(&mut self.events, None);
                Effects::one(fetch_active_events::<E>(&request, ctx.page.timezone()))
                    .unchanged()
                    .join(hide_legacy_list_effects)
                    .join(request_effects)
                    .join(events_effects)
            }
            Msg::Internal(Internal::ActiveEventsResult(request, events))
                if self.request.as_ref() == Some(request) && self.events.is_none() =>
            {
                eq_update(&mut self.events, Some(events.to_owned()))
            }
            _ => Effects::none().unchanged(),
        }
    }
}
