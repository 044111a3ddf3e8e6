use chrono::FixedOffset;
use enclose::enclose;
use futures::FutureExt;

use crate::runtime::msg::{Internal, Msg};
use crate::runtime::{Effect, EffectFuture, Env, EnvFutureExt};
use crate::types::api::{fetch_api, EventsRequest, EventsResponse};
use crate::types::event::active_events;

/// Loads the events for the request and keeps the active ones, most recently
/// started first. Wall clock times of the API are read in `timezone`.
/// Failures are logged and resolve with an empty list.
pub fn fetch_active_events<E: Env + 'static>(
    request: &EventsRequest,
    timezone: FixedOffset,
) -> Effect {
    EffectFuture::Concurrent(
        fetch_api::<E, _, _, EventsResponse>(request)
            .map(enclose!((request.to_owned() => request) move |result| {
                let events = match result {
                    Ok(response) => active_events(
                        response.into_events(),
                        request.region,
                        E::now(),
                        &timezone,
                    ),
                    Err(error) => {
                        tracing::warn!(%error, region = %request.region, "events fetch failed");
                        vec![]
                    }
                };
                Msg::Internal(Internal::ActiveEventsResult(request, events))
            }))
            .boxed_env(),
    )
    .into()
}
