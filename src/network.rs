// Transport-agnostic request plumbing. View states queue `OutgoingRequest`s; front-ends
// deliver them and feed back `RequestResult`s tagged with the same `RequestId`.

use std::sync::mpsc;

use serde::de::DeserializeOwned;

use crate::api::{ApiRequest, HTTP_OK};
use crate::error::{ResponseError, TransportError};


#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub id: RequestId,
    pub request: ApiRequest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub type RequestResult = Result<HttpResponse, TransportError>;

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse { status, body: body.into() }
    }
    pub fn is_ok(&self) -> bool { self.status == HTTP_OK }
}

// Turns anything but a parseable 200 into an error.
pub fn parse_ok<T: DeserializeOwned>(result: &RequestResult) -> Result<T, ResponseError> {
    let response = result.as_ref().map_err(|err| ResponseError::Transport(err.clone()))?;
    if !response.is_ok() {
        return Err(ResponseError::Status(response.status));
    }
    Ok(serde_json::from_str(&response.body)?)
}

// Hands out request ids and pushes requests to whoever delivers them.
pub struct RequestQueue {
    requests_tx: mpsc::Sender<OutgoingRequest>,
    next_id: u64,
}

impl RequestQueue {
    pub fn new(requests_tx: mpsc::Sender<OutgoingRequest>) -> Self {
        RequestQueue { requests_tx, next_id: 0 }
    }

    pub fn send(&mut self, request: ApiRequest) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        log::debug!("Queueing {} request {:?}", request.name(), id);
        if self.requests_tx.send(OutgoingRequest { id, request }).is_err() {
            // Receiver is gone only when the front-end is shutting down.
            log::warn!("Dropping request {:?}: nobody is listening", id);
        }
        id
    }
}
