use std::any::Any;

use futures::channel::mpsc::Receiver;
use futures::future;

use crate::models::ctx::Ctx;
use crate::models::event_banner::EventBanner;
use crate::models::event_list::EventList;
use crate::runtime::msg::{Action, ActionLoad};
use crate::runtime::{EnvFutureExt, Runtime, RuntimeAction, RuntimeEvent};
use crate::types::api::EventsResponse;
use crate::types::dismissed_popups::DismissedPopupsBucket;
use crate::types::page::PageContext;
use crate::unit_tests::{
    default_fetch_handler, event, page, Request, TestEnv, FETCH_HANDLER, REQUESTS,
};
use crate::Model;

#[derive(Model, Clone, Debug)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
    event_banner: EventBanner,
    event_list: EventList,
}

fn fetch_handler(request: Request) -> crate::runtime::TryEnvFuture<Box<dyn Any + Send>> {
    match request {
        Request { url, .. } if url == "https://api-prod.fluv.com/events?limit=100&region=3" => {
            future::ok(Box::new(EventsResponse::Bare(vec![
                event("hk", 3, "2025-06-01T00:00:00Z", "2025-06-30T00:00:00Z"),
                event("tw", 1, "2025-06-01T00:00:00Z", "2025-06-30T00:00:00Z"),
            ])) as Box<dyn Any + Send>)
            .boxed_env()
        }
        _ => default_fetch_handler(request),
    }
}

fn load(
    page: PageContext,
    actions: Vec<ActionLoad>,
) -> (
    Runtime<TestEnv, TestModel>,
    Receiver<RuntimeEvent<TestEnv, TestModel>>,
) {
    let (runtime, rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::new(page, DismissedPopupsBucket::default()),
            event_banner: Default::default(),
            event_list: Default::default(),
        },
        vec![],
        1000,
    );
    TestEnv::run(|| {
        for action in actions {
            runtime.dispatch(RuntimeAction {
                field: None,
                action: Action::Load(action),
            });
        }
    });
    (runtime, rx)
}

#[test]
fn not_loaded_without_test_mode() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = load(page("/hk/event-list", ""), vec![ActionLoad::EventList]);
    assert!(REQUESTS.read().unwrap().is_empty());
    assert_eq!(runtime.model().unwrap().event_list, EventList::default());
}

#[test]
fn legacy_list_hidden_outside_the_event_list_page() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    let (runtime, _rx) = load(page("/hk/blog/", "test"), vec![ActionLoad::EventList]);
    assert!(REQUESTS.read().unwrap().is_empty(), "No request off the list page");
    let model = runtime.model().unwrap();
    assert!(model.event_list.hide_legacy_list);
    assert_eq!(model.event_list.events, None);
}

#[test]
fn event_list_page_loads_active_events() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, _rx) = load(page("/hk/event-list/", "test"), vec![ActionLoad::EventList]);
    let model = runtime.model().unwrap();
    assert!(model.event_list.hide_legacy_list);
    assert_eq!(
        model
            .event_list
            .events
            .as_ref()
            .map(|events| events.iter().map(|event| event.id.as_str()).collect::<Vec<_>>()),
        Some(vec!["hk"])
    );
}

#[test]
fn banner_and_list_share_the_response() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(fetch_handler);
    let (runtime, _rx) = load(
        page("/hk/event-list", "test"),
        vec![ActionLoad::EventBanner, ActionLoad::EventList],
    );
    let model = runtime.model().unwrap();
    assert_eq!(model.event_list.events, model.event_banner.events);
    assert_eq!(model.event_list.events.as_ref().map(Vec::len), Some(1));
}
