use std::time::Duration;

use chrono::{offset::TimeZone, DateTime, Utc};
use futures::{future, Future, FutureExt};
use http::{Method, Request};
use serde::{Deserialize, Serialize};
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Storage, Window};

use fluv_widgets::{
    runtime::{ConditionalSend, Env, EnvError, EnvFuture, EnvFutureExt, TryEnvFuture},
    types::api::DecodeErrorStatus,
};

const UNKNOWN_ERROR: &str = "Unknown Error";

pub enum WebEnv {}

impl WebEnv {
    pub fn window() -> Result<Window, EnvError> {
        web_sys::window().ok_or_else(|| EnvError::Other("window is not available".to_owned()))
    }
    fn local_storage() -> Result<Storage, EnvError> {
        Self::window()?
            .local_storage()
            .ok()
            .flatten()
            .ok_or(EnvError::StorageUnavailable)
    }
}

impl Env for WebEnv {
    fn fetch<
        IN: Serialize + ConditionalSend + 'static,
        OUT: for<'de> Deserialize<'de> + ConditionalSend + 'static,
    >(
        request: Request<IN>,
    ) -> TryEnvFuture<OUT> {
        let (parts, body) = request.into_parts();
        let url = parts.uri.to_string();
        let decodes_error_status = parts.extensions.get::<DecodeErrorStatus>().is_some();
        trace!(method = %parts.method, %url, "fetch");
        let request = (|| {
            let headers = web_sys::Headers::new().map_err(js_error(EnvError::Fetch))?;
            for (key, value) in parts.headers.iter() {
                headers
                    .append(key.as_str(), &String::from_utf8_lossy(value.as_bytes()))
                    .map_err(js_error(EnvError::Fetch))?;
            }
            let body = match serde_json::to_string(&body)? {
                body if body != "null" && parts.method != Method::GET => {
                    Some(JsValue::from_str(&body))
                }
                _ => None,
            };
            let request_options = web_sys::RequestInit::new();
            request_options.set_method(parts.method.as_str());
            request_options.set_headers(&headers);
            request_options.set_body(&body.unwrap_or(JsValue::UNDEFINED));
            let request = web_sys::Request::new_with_str_and_init(&url, &request_options)
                .map_err(js_error(EnvError::Fetch))?;
            Ok::<_, EnvError>(Self::window()?.fetch_with_request(&request))
        })();
        async move {
            let promise = request?;
            let resp = JsFuture::from(promise)
                .await
                .map_err(js_error(EnvError::Fetch))?
                .dyn_into::<web_sys::Response>()
                .map_err(js_error(EnvError::Fetch))?;
            if !resp.ok() && !decodes_error_status {
                return Err(status_error(resp.status()));
            }
            let text = resp.text().map_err(js_error(EnvError::Fetch))?;
            let text = JsFuture::from(text)
                .await
                .map_err(js_error(EnvError::Fetch))?
                .as_string()
                .ok_or_else(|| EnvError::Fetch("response body is not a string".to_owned()))?;
            if resp.ok() {
                response_deserialize(&text)
            } else {
                error_status_deserialize(resp.status(), &text)
            }
        }
        .boxed_env()
    }

    fn get_storage<T: for<'de> Deserialize<'de> + ConditionalSend + 'static>(
        key: &str,
    ) -> TryEnvFuture<Option<T>> {
        let result = Self::local_storage().and_then(|storage| {
            storage
                .get_item(key)
                .map_err(js_error(EnvError::StorageReadError))?
                .map(|value| serde_json::from_str(&value))
                .transpose()
                .map_err(EnvError::from)
        });
        future::ready(result).boxed_env()
    }

    fn set_storage<T: Serialize>(key: &str, value: Option<&T>) -> TryEnvFuture<()> {
        let result = Self::local_storage().and_then(|storage| match value {
            Some(value) => {
                let value = serde_json::to_string(value)?;
                storage
                    .set_item(key, &value)
                    .map_err(js_error(EnvError::StorageWriteError))
            }
            None => storage
                .remove_item(key)
                .map_err(js_error(EnvError::StorageWriteError)),
        });
        future::ready(result).boxed_env()
    }

    fn exec_concurrent<F: Future<Output = ()> + ConditionalSend + 'static>(future: F) {
        spawn_local(future)
    }

    fn exec_sequential<F: Future<Output = ()> + ConditionalSend + 'static>(future: F) {
        spawn_local(future)
    }

    fn sleep(duration: Duration) -> EnvFuture<'static, ()> {
        let timeout = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let result = Self::window().and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
                    .map_err(js_error(EnvError::Other))
            });
            if let Err(error) = result {
                tracing::error!(%error, "timer not scheduled");
            }
        });
        JsFuture::from(promise).map(|_| ()).boxed_env()
    }

    fn now() -> DateTime<Utc> {
        let msecs = js_sys::Date::now() as i64;
        Utc.timestamp_millis_opt(msecs).single().unwrap_or_default()
    }
}

/// Wraps the message of a thrown JS error into an [`EnvError`] variant.
fn js_error(variant: fn(String) -> EnvError) -> impl Fn(JsValue) -> EnvError {
    move |error| {
        variant(
            error
                .dyn_into::<js_sys::Error>()
                .map(|error| String::from(error.message()))
                .unwrap_or_else(|_| UNKNOWN_ERROR.to_owned()),
        )
    }
}

fn response_deserialize<OUT>(response: &str) -> Result<OUT, EnvError>
where
    for<'de> OUT: Deserialize<'de> + 'static,
{
    let mut deserializer = serde_json::Deserializer::from_str(response);
    serde_path_to_error::deserialize::<_, OUT>(&mut deserializer)
        .map_err(|error| EnvError::Fetch(error.to_string()))
}

fn status_error(status: u16) -> EnvError {
    EnvError::Fetch(format!("Unexpected HTTP status code {status}"))
}

/// Body of a non-2xx answer, kept only when it has the expected shape.
fn error_status_deserialize<OUT>(status: u16, response: &str) -> Result<OUT, EnvError>
where
    for<'de> OUT: Deserialize<'de> + 'static,
{
    response_deserialize(response).map_err(|error| {
        trace!(%error, status, "error status body not decoded");
        status_error(status)
    })
}
