use std::cell::RefCell;
use std::rc::Rc;

use buzzer::api::{ApiRequest, CONTENT_TYPE};
use buzzer::error::TransportError;
use buzzer::network::{HttpResponse, OutgoingRequest, RequestId, RequestResult};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};

use crate::web_document::web_window;
use crate::web_error_handling::JsResult;


pub async fn post_json(request: &ApiRequest) -> RequestResult {
    fetch(request).await.map_err(|err| TransportError(format!("{err:?}")))
}

async fn fetch(request: &ApiRequest) -> JsResult<HttpResponse> {
    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&request.body_string()));
    let web_request = web_sys::Request::new_with_str_and_init(&request.path(), &init)?;
    web_request.headers().set("Content-Type", CONTENT_TYPE)?;
    let response: web_sys::Response =
        JsFuture::from(web_window()?.fetch_with_request(&web_request)).await?.dyn_into()?;
    let status = response.status();
    let body = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();
    Ok(HttpResponse { status, body })
}

// Sends everything the view has queued. Each request runs independently: responses come back
// in whatever order the network delivers them and are handed to `on_response`.
pub fn dispatch_requests<V: 'static>(
    view: &Rc<RefCell<V>>, requests: Vec<OutgoingRequest>,
    on_response: fn(&Rc<RefCell<V>>, RequestId, RequestResult),
) {
    for OutgoingRequest { id, request } in requests {
        let view = Rc::clone(view);
        spawn_local(async move {
            let result = post_json(&request).await;
            match &result {
                Ok(response) => log::debug!("{} response: {}", request.path(), response.status),
                Err(err) => log::debug!("{} failed: {err}", request.path()),
            }
            on_response(&view, id, result);
        });
    }
}
