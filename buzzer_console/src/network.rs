use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use buzzer::api::{ApiRequest, CONTENT_TYPE};
use buzzer::error::TransportError;
use buzzer::network::{HttpResponse, OutgoingRequest, RequestId, RequestResult};
use url::Url;


#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(server_address: &str) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(server_address)
            .with_context(|| format!("Invalid server address: {server_address}"))?;
        // Keep any path prefix when joining API paths.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(HttpClient {
            base_url,
            client: reqwest::blocking::Client::new(),
        })
    }

    pub fn request_url(&self, request: &ApiRequest) -> Result<Url, url::ParseError> {
        self.base_url.join(request.path().trim_start_matches('/'))
    }

    pub fn send(&self, request: &ApiRequest) -> RequestResult {
        let url = self.request_url(request).map_err(|err| TransportError(err.to_string()))?;
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(request.body_string())
            .send()
            .map_err(|err| TransportError(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|err| TransportError(err.to_string()))?;
        log::debug!("{} response: {status} {body}", request.path());
        Ok(HttpResponse { status, body })
    }

    // Sends the request on its own thread; the result comes back through `events_tx`.
    pub fn spawn_send<E: Send + 'static>(
        &self, outgoing: OutgoingRequest, events_tx: mpsc::Sender<E>,
        wrap: fn(RequestId, RequestResult) -> E,
    ) {
        let http = self.clone();
        thread::spawn(move || {
            let OutgoingRequest { id, request } = outgoing;
            let result = http.send(&request);
            // Fails only when the event loop is gone, and then nobody cares.
            let _ = events_tx.send(wrap(id, result));
        });
    }
}
