use std::sync::RwLock;

use futures::{future, StreamExt};
use gloo_utils::format::JsValueSerdeExt;
use lazy_static::lazy_static;
use tracing::{debug, error, info, warn, Level};
use tracing_wasm::WASMLayerConfigBuilder;
use url::Url;
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::Window;

use fluv_widgets::{
    constants::DISMISSED_POPUPS_STORAGE_KEY,
    models::common::Loadable,
    runtime::{msg::Action, Env, EnvError, Runtime, RuntimeAction, RuntimeEvent},
    types::{dismissed_popups::DismissedPopupsBucket, page::PageContext},
};

use crate::{
    dom,
    env::WebEnv,
    model::{WebModel, WebModelField},
};

lazy_static! {
    static ref RUNTIME: RwLock<Option<Loadable<Runtime<WebEnv, WebModel>, EnvError>>> =
        Default::default();
}

#[wasm_bindgen(start)]
pub fn start() {
    // print pretty errors in wasm https://github.com/rustwasm/console_error_panic_hook
    console_error_panic_hook::set_once();

    #[cfg(any(debug_assertions, feature = "log-trace"))]
    let max_level = Level::TRACE;
    #[cfg(all(not(debug_assertions), not(feature = "log-trace")))]
    let max_level = Level::ERROR;

    let config = WASMLayerConfigBuilder::default()
        .set_max_level(max_level)
        .build();
    // setup wasm tracing Subscriber on web console
    tracing_wasm::set_as_global_default_with_config(config);

    info!(?max_level, "Logging level");
}

/// Mounts every widget in the current page. Meant to be called once the
/// document is parsed.
#[wasm_bindgen]
pub async fn initialize_runtime() -> Result<(), JsValue> {
    {
        let mut runtime = RUNTIME.write().map_err(lock_error)?;
        if runtime.is_some() {
            return Err(JsValue::from_str(
                "runtime initialization has already started",
            ));
        }
        *runtime = Some(Loadable::Loading);
    }
    let page = match page_context() {
        Ok(page) => page,
        Err(error) => {
            *RUNTIME.write().map_err(lock_error)? = Some(Loadable::Err(error.to_owned()));
            return Err(to_js_error(&error));
        }
    };
    debug!(?page, "page context");
    let dismissed_popups =
        match WebEnv::get_storage::<DismissedPopupsBucket>(DISMISSED_POPUPS_STORAGE_KEY).await {
            Ok(dismissed_popups) => dismissed_popups.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "dismissed popups not restored");
                DismissedPopupsBucket::default()
            }
        };
    let (runtime, rx) =
        Runtime::<WebEnv, _>::new(WebModel::new(page, dismissed_popups), vec![], 1000);
    WebEnv::exec_concurrent(rx.for_each(|event| {
        match event {
            RuntimeEvent::NewState(fields) => render(&fields),
            RuntimeEvent::CoreEvent(event) => debug!(?event, "core event"),
        };
        future::ready(())
    }));
    *RUNTIME.write().map_err(lock_error)? = Some(Loadable::Ready(runtime));
    listen_resize(&WebEnv::window().map_err(|error| to_js_error(&error))?)?;
    WebModel::load_actions()
        .into_iter()
        .for_each(dispatch_action);
    Ok(())
}

#[wasm_bindgen]
#[cfg(debug_assertions)]
pub fn get_debug_state() -> Result<JsValue, JsValue> {
    with_runtime(|runtime| {
        let model = runtime.model().map_err(lock_error)?;
        <JsValue as JsValueSerdeExt>::from_serde(&*model)
            .map_err(|error| JsValue::from_str(&error.to_string()))
    })
}

#[wasm_bindgen]
pub fn get_state(field: JsValue) -> Result<JsValue, JsValue> {
    let field: WebModelField = JsValueSerdeExt::into_serde(&field)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    with_runtime(|runtime| {
        let model = runtime.model().map_err(lock_error)?;
        model
            .get_state(&field)
            .map_err(|error| JsValue::from_str(&error.to_string()))
    })
}

#[wasm_bindgen]
pub fn dispatch(action: JsValue, field: JsValue) -> Result<(), JsValue> {
    let action: Action = JsValueSerdeExt::into_serde(&action)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let field: Option<WebModelField> = JsValueSerdeExt::into_serde(&field)
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    with_runtime(|runtime| {
        runtime.dispatch(RuntimeAction { field, action });
        Ok(())
    })
}

fn dispatch_action(action: Action) {
    let result = with_runtime(|runtime| {
        runtime.dispatch(RuntimeAction {
            field: None,
            action,
        });
        Ok(())
    });
    if let Err(error) = result {
        error!(?error, "dispatch failed");
    }
}

fn render(fields: &[WebModelField]) {
    let result = with_runtime(|runtime| {
        let window = WebEnv::window().map_err(|error| to_js_error(&error))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("document is not available"))?;
        let viewport_width = viewport_width(&window);
        let model = runtime.model().map_err(lock_error)?;
        fields.iter().try_for_each(|field| {
            dom::apply(
                &document,
                &model.render(field, viewport_width),
                dispatch_action,
            )
        })
    });
    if let Err(error) = result {
        error!(?error, ?fields, "render failed");
    }
}

fn with_runtime<T>(
    f: impl FnOnce(&Runtime<WebEnv, WebModel>) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    let runtime = RUNTIME.read().map_err(lock_error)?;
    match runtime.as_ref() {
        Some(Loadable::Ready(runtime)) => f(runtime),
        Some(Loadable::Err(error)) => Err(to_js_error(error)),
        _ => Err(JsValue::from_str("runtime is not ready")),
    }
}

fn page_context() -> Result<PageContext, EnvError> {
    let href = WebEnv::window()?
        .location()
        .href()
        .map_err(|_| EnvError::Other("location is not available".to_owned()))?;
    let url = Url::parse(&href).map_err(|error| EnvError::Other(error.to_string()))?;
    // getTimezoneOffset is UTC minus local time, in minutes
    let utc_offset = -(js_sys::Date::new_0().get_timezone_offset() * 60.0) as i32;
    Ok(PageContext::new(&url, utc_offset))
}

fn viewport_width(window: &Window) -> u32 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .map(|width| width as u32)
        .unwrap_or_default()
}

fn listen_resize(window: &Window) -> Result<(), JsValue> {
    let listener =
        Closure::wrap(Box::new(|| render(&[WebModelField::EventList])) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

fn to_js_error(error: &EnvError) -> JsValue {
    <JsValue as JsValueSerdeExt>::from_serde(error)
        .unwrap_or_else(|_| JsValue::from_str(&error.message()))
}

fn lock_error<T>(_: T) -> JsValue {
    JsValue::from_str("runtime lock poisoned")
}
