use std::any::Any;
use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::channel::mpsc::Receiver;
use futures::future;

use crate::constants::{DISMISSED_POPUPS_STORAGE_KEY, SUBMIT_EMAIL_FAILED_MESSAGE};
use crate::models::common::Loadable;
use crate::models::ctx::Ctx;
use crate::models::popup::{EmailForm, PromoPopup, SelectedPopup};
use crate::runtime::msg::{Action, ActionLoad, ActionPopup};
use crate::runtime::{EnvError, EnvFutureExt, Runtime, RuntimeAction, RuntimeEvent, TryEnvFuture};
use crate::types::api::{PopupsResponse, SubmitEmailResponse};
use crate::types::dismissed_popups::DismissedPopupsBucket;
use crate::types::page::PageContext;
use crate::types::popup::{Popup, PopupLogic, PopupType};
use crate::unit_tests::{
    default_fetch_handler, page, FetchHandler, Request, TestEnv, FETCH_HANDLER, NOW, REQUESTS,
    STORAGE,
};
use crate::Model;

#[derive(Model, Clone, Debug)]
#[model(TestEnv)]
struct TestModel {
    ctx: Ctx,
    popup: PromoPopup,
}

fn time(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

fn popup(id: &str, popup_logic: PopupLogic, hosts: &[&str], created_at: &str) -> Popup {
    Popup {
        id: id.to_owned(),
        popup_logic,
        popup_type: PopupType::Image,
        html: Some(serde_json::json!({ "allow": hosts }).to_string()),
        image_link: Some("https://www.fluv.com/promo".to_owned()),
        image: Some("https://edm.fluv.com/promo.png".to_owned()),
        created_at: Some(time(created_at)),
        ..Default::default()
    }
}

fn email_popup(id: &str) -> Popup {
    Popup {
        popup_type: PopupType::EmailCollector,
        content: Some("Subscribe for deals".to_owned()),
        image_link: None,
        image: None,
        ..popup(id, PopupLogic::ShowOnce, &["www.fluv.com"], "2025-06-01T00:00:00Z")
    }
}

/// Answers the popups endpoint with `popups` and the submit endpoint with
/// `submit_response`.
fn fetch_handler(popups: Vec<Popup>, submit_response: Option<SubmitEmailResponse>) -> FetchHandler {
    Box::new(move |request: Request| match request {
        Request { url, method, .. }
            if url.starts_with("https://api-prod.fluv.com/popups/active?") && method == "GET" =>
        {
            future::ok(Box::new(PopupsResponse {
                data: popups.to_owned(),
            }) as Box<dyn Any + Send>)
            .boxed_env()
        }
        Request { url, method, .. } if url.ends_with("/submit-email") && method == "POST" => {
            match &submit_response {
                Some(response) => {
                    future::ok(Box::new(response.to_owned()) as Box<dyn Any + Send>).boxed_env()
                }
                None => future::err(EnvError::Fetch("500 Internal Server Error".to_owned()))
                    .boxed_env(),
            }
        }
        _ => default_fetch_handler(request),
    })
}

fn load(
    page: PageContext,
    dismissed_popups: DismissedPopupsBucket,
) -> (
    Runtime<TestEnv, TestModel>,
    Receiver<RuntimeEvent<TestEnv, TestModel>>,
) {
    let (runtime, rx) = Runtime::<TestEnv, _>::new(
        TestModel {
            ctx: Ctx::new(page, dismissed_popups),
            popup: Default::default(),
        },
        vec![],
        1000,
    );
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action: Action::Load(ActionLoad::Popup),
        })
    });
    (runtime, rx)
}

fn dispatch(runtime: &Runtime<TestEnv, TestModel>, action: ActionPopup) {
    TestEnv::run(|| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action: Action::Popup(action),
        })
    });
}

fn selected(runtime: &Runtime<TestEnv, TestModel>) -> Option<SelectedPopup> {
    match &runtime.model().unwrap().popup.selected {
        Some(Loadable::Ready(selected)) => selected.to_owned(),
        _ => None,
    }
}

fn dismissed(id: &str, at: &str) -> DismissedPopupsBucket {
    DismissedPopupsBucket::new(HashMap::from([(id.to_owned(), time(at))]))
}

fn stored_dismissed_popups() -> Option<DismissedPopupsBucket> {
    STORAGE
        .read()
        .unwrap()
        .get(DISMISSED_POPUPS_STORAGE_KEY)
        .map(|value| serde_json::from_str(value).unwrap())
}

#[test]
fn newest_popup_for_the_hostname_is_selected() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![
            popup("old", PopupLogic::Always, &["www.fluv.com"], "2025-05-01T00:00:00Z"),
            popup("other_host", PopupLogic::Always, &["jp.fluv.com"], "2025-06-10T00:00:00Z"),
            popup("new", PopupLogic::Always, &["shop.fluv.com", "www.fluv.com"], "2025-06-01T00:00:00Z"),
        ],
        None,
    );
    let (runtime, _rx) = load(page("/jp/", ""), DismissedPopupsBucket::default());
    assert_eq!(
        REQUESTS.read().unwrap()[0].url,
        "https://api-prod.fluv.com/popups/active?region=2"
    );
    let selected = selected(&runtime).expect("Should have a popup");
    assert_eq!(selected.popup.id, "new");
    assert!(selected.is_open);
    assert_eq!(selected.form, EmailForm::Idle);
}

#[test]
fn no_popup_for_the_hostname() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![
            popup("1", PopupLogic::Always, &["jp.fluv.com"], "2025-05-01T00:00:00Z"),
            Popup {
                html: Some("not json".to_owned()),
                ..popup("2", PopupLogic::Always, &[], "2025-05-01T00:00:00Z")
            },
        ],
        None,
    );
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    assert_eq!(
        runtime.model().unwrap().popup.selected,
        Some(Loadable::Ready(None))
    );
}

#[test]
fn fetch_failure_selects_nothing() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(crate::unit_tests::failing_fetch_handler);
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    assert!(matches!(
        runtime.model().unwrap().popup.selected,
        Some(Loadable::Err(_))
    ));
    assert_eq!(selected(&runtime), None);
}

#[test]
fn show_once_never_returns_after_dismissal() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![popup("1", PopupLogic::ShowOnce, &["www.fluv.com"], "2025-06-01T00:00:00Z")],
        None,
    );
    let (runtime, _rx) = load(page("/", ""), dismissed("1", "2024-01-01T00:00:00Z"));
    let selected = selected(&runtime).expect("Should have a popup");
    assert!(!selected.is_open, "Only the reopen button should show");
}

#[test]
fn oneday_show_once_uses_the_local_calendar_day() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    // 2025-06-15 20:00 in Taipei
    *NOW.write().unwrap() = time("2025-06-15T12:00:00Z");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![popup("1", PopupLogic::OnedayShowOnce, &["www.fluv.com"], "2025-06-01T00:00:00Z")],
        None,
    );
    // 2025-06-14 23:00 in Taipei
    let (runtime, _rx) = load(page("/", ""), dismissed("1", "2025-06-14T15:00:00Z"));
    assert!(selected(&runtime).unwrap().is_open, "Dismissed on the previous day");
    // 2025-06-15 01:00 in Taipei, still 2025-06-14 in UTC
    let (runtime, _rx) = load(page("/", ""), dismissed("1", "2025-06-14T17:00:00Z"));
    assert!(!selected(&runtime).unwrap().is_open, "Dismissed earlier today");
}

#[test]
fn test_mode_ignores_dismissals() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![popup("1", PopupLogic::ShowOnce, &["www.fluv.com"], "2025-06-01T00:00:00Z")],
        None,
    );
    let (runtime, _rx) = load(page("/", "test"), dismissed("1", "2025-06-15T11:00:00Z"));
    assert_eq!(
        REQUESTS.read().unwrap()[0].url,
        "https://api-prod.fluv.com/popups/active?region=1&test=true"
    );
    assert!(selected(&runtime).unwrap().is_open);
}

#[test]
fn close_persists_dismissal_and_reopen_shows_again() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![popup("7", PopupLogic::ShowOnce, &["www.fluv.com"], "2025-06-01T00:00:00Z")],
        None,
    );
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    dispatch(&runtime, ActionPopup::Close);
    assert!(!selected(&runtime).unwrap().is_open);
    let expected = dismissed("7", "2025-06-15T12:00:00Z");
    assert_eq!(runtime.model().unwrap().ctx.dismissed_popups, expected);
    assert_eq!(stored_dismissed_popups(), Some(expected));
    assert_eq!(
        STORAGE.read().unwrap().get(DISMISSED_POPUPS_STORAGE_KEY).cloned(),
        Some(r#"{"7":"2025-06-15T12:00:00Z"}"#.to_owned()),
        "Should keep the legacy storage format"
    );
    dispatch(&runtime, ActionPopup::Reopen);
    assert!(selected(&runtime).unwrap().is_open);
}

#[test]
fn email_success_shows_message_then_hides() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![email_popup("42")],
        Some(SubmitEmailResponse {
            success: true,
            message: Some("Thanks!".to_owned()),
            ..Default::default()
        }),
    );
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    dispatch(&runtime, ActionPopup::SubmitEmail(" cat@fluv.com ".to_owned()));
    let request = REQUESTS.read().unwrap().last().cloned().unwrap();
    assert_eq!(request.url, "https://api-prod.fluv.com/popups/42/submit-email");
    assert_eq!(request.method, "POST");
    assert_eq!(request.body, r#"{"email":"cat@fluv.com"}"#);
    assert_eq!(
        request.headers.get("content-type").cloned(),
        Some("application/json".to_owned())
    );
    let selected_popup = selected(&runtime).unwrap();
    assert_eq!(
        selected_popup.form,
        EmailForm::Succeeded {
            message: Some("Thanks!".to_owned())
        }
    );
    assert!(selected_popup.is_open);
    assert!(stored_dismissed_popups().unwrap().items.contains_key("42"));
    assert_eq!(TestEnv::timers(), vec![Duration::from_secs(3)]);
    TestEnv::fire_timers();
    assert!(!selected(&runtime).unwrap().is_open);
}

#[test]
fn email_success_with_close_action_hides_now() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![email_popup("42")],
        Some(SubmitEmailResponse {
            success: true,
            success_action: Some("close".to_owned()),
            ..Default::default()
        }),
    );
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    dispatch(&runtime, ActionPopup::SubmitEmail("cat@fluv.com".to_owned()));
    assert!(!selected(&runtime).unwrap().is_open);
    assert!(TestEnv::timers().is_empty());
    assert!(runtime
        .model()
        .unwrap()
        .ctx
        .dismissed_popups
        .items
        .contains_key("42"));
}

#[test]
fn email_rejection_shows_server_error() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![email_popup("42")],
        Some(SubmitEmailResponse {
            success: false,
            error: Some("Already subscribed".to_owned()),
            ..Default::default()
        }),
    );
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    dispatch(&runtime, ActionPopup::SubmitEmail("cat@fluv.com".to_owned()));
    let requests = REQUESTS.read().unwrap().clone();
    assert!(
        !requests[0].decodes_error_status,
        "Popups fetch should fail on an error status"
    );
    assert!(
        requests[1].decodes_error_status,
        "Rejections arrive with a 4xx status and should still be decoded"
    );
    let selected_popup = selected(&runtime).unwrap();
    assert_eq!(
        selected_popup.form,
        EmailForm::Failed {
            message: "Already subscribed".to_owned()
        }
    );
    assert!(selected_popup.is_open);
    assert_eq!(stored_dismissed_popups(), None, "Nothing should be recorded");
    dispatch(&runtime, ActionPopup::SubmitEmail("cat@fluv.com".to_owned()));
    assert_eq!(REQUESTS.read().unwrap().len(), 3, "Retry should be allowed");
}

#[test]
fn email_transport_failure_shows_generic_error() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(vec![email_popup("42")], None);
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    dispatch(&runtime, ActionPopup::SubmitEmail("cat@fluv.com".to_owned()));
    assert_eq!(
        selected(&runtime).unwrap().form,
        EmailForm::Failed {
            message: SUBMIT_EMAIL_FAILED_MESSAGE.to_owned()
        }
    );
}

#[test]
fn email_submission_ignored_when_empty_or_in_flight() {
    fn pending_submit_handler(request: Request) -> TryEnvFuture<Box<dyn Any + Send>> {
        match request {
            Request { url, .. } if url.ends_with("/submit-email") => {
                future::pending::<Result<Box<dyn Any + Send>, EnvError>>().boxed_env()
            }
            Request { url, .. } if url.contains("/popups/active?") => {
                future::ok(Box::new(PopupsResponse {
                    data: vec![email_popup("42")],
                }) as Box<dyn Any + Send>)
                .boxed_env()
            }
            _ => default_fetch_handler(request),
        }
    }

    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = Box::new(pending_submit_handler);
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    dispatch(&runtime, ActionPopup::SubmitEmail("   ".to_owned()));
    assert_eq!(REQUESTS.read().unwrap().len(), 1, "Empty email should be ignored");
    dispatch(&runtime, ActionPopup::SubmitEmail("cat@fluv.com".to_owned()));
    dispatch(&runtime, ActionPopup::SubmitEmail("dog@fluv.com".to_owned()));
    assert_eq!(REQUESTS.read().unwrap().len(), 2, "Second submission should be ignored");
    assert_eq!(
        selected(&runtime).unwrap().form,
        EmailForm::Submitting {
            email: "cat@fluv.com".to_owned()
        }
    );
}

#[test]
fn image_popup_ignores_email_submission() {
    let _env_mutex = TestEnv::reset().expect("Should have exclusive lock to TestEnv");
    *FETCH_HANDLER.write().unwrap() = fetch_handler(
        vec![popup("1", PopupLogic::Always, &["www.fluv.com"], "2025-06-01T00:00:00Z")],
        None,
    );
    let (runtime, _rx) = load(page("/", ""), DismissedPopupsBucket::default());
    dispatch(&runtime, ActionPopup::SubmitEmail("cat@fluv.com".to_owned()));
    assert_eq!(REQUESTS.read().unwrap().len(), 1);
    assert_eq!(selected(&runtime).unwrap().form, EmailForm::Idle);
}
