use crate::runtime::{ConditionalSend, Env, TryEnvFuture};
use crate::types::api::FetchRequestParams;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request};
use serde::{Deserialize, Serialize};

/// Request extension telling the [`Env`] to decode the body of a non-2xx
/// answer instead of failing on the status alone.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DecodeErrorStatus;

pub fn fetch_api<
    E: Env,
    BODY: Serialize + ConditionalSend + 'static,
    REQ: FetchRequestParams<BODY> + Clone,
    RESP: for<'de> Deserialize<'de> + ConditionalSend + 'static,
>(
    api_request: &REQ,
) -> TryEnvFuture<RESP> {
    let mut url = api_request
        .endpoint()
        .join(&api_request.path())
        .expect("url builder failed");
    url.set_query(api_request.query().as_deref());
    let method = api_request.method();
    let builder = Request::builder()
        .method(method.clone())
        .uri(url.as_str())
        .header(ACCEPT, "application/json");
    let builder = if method == Method::GET {
        builder
    } else {
        builder.header(CONTENT_TYPE, "application/json")
    };
    let builder = if api_request.decodes_error_status() {
        builder.extension(DecodeErrorStatus)
    } else {
        builder
    };
    let request = builder
        .body(api_request.to_owned().body())
        .expect("request builder failed");
    E::fetch::<_, _>(request)
}
