// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;

use buzzer::api::ApiRequest;
use buzzer::error::TransportError;
use buzzer::network::{HttpResponse, OutgoingRequest, RequestResult};
use buzzer::session::{GAME_EXT_ID_ITEM, SESSION_KEY_ITEM};
use buzzer::session_store::{MemoryStorage, SessionStorage, StorageError};
use itertools::Itertools;


// Collects whatever a view state wants to send.
pub struct Outbox {
    rx: mpsc::Receiver<OutgoingRequest>,
}

impl Outbox {
    pub fn new() -> (mpsc::Sender<OutgoingRequest>, Outbox) {
        let (tx, rx) = mpsc::channel();
        (tx, Outbox { rx })
    }

    pub fn drain(&self) -> Vec<OutgoingRequest> { self.rx.try_iter().collect_vec() }

    #[allow(dead_code)]
    pub fn drain_requests(&self) -> Vec<ApiRequest> {
        self.drain().into_iter().map(|r| r.request).collect_vec()
    }
}

#[allow(dead_code)]
pub fn ok(body: serde_json::Value) -> RequestResult { Ok(HttpResponse::new(200, body.to_string())) }

#[allow(dead_code)]
pub fn status(code: u16) -> RequestResult { Ok(HttpResponse::new(code, "{}")) }

#[allow(dead_code)]
pub fn offline() -> RequestResult { Err(TransportError("connection refused".to_owned())) }

#[allow(dead_code)]
pub fn storage_with_session(session_key: &str, game_ext_id: &str) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    storage.set_item(SESSION_KEY_ITEM, session_key).unwrap();
    storage.set_item(GAME_EXT_ID_ITEM, game_ext_id).unwrap();
    storage
}

// Storage that refuses every write, like a browser with storage disabled.
#[allow(dead_code)]
pub struct ReadOnlyStorage(pub MemoryStorage);

impl SessionStorage for ReadOnlyStorage {
    fn get_item(&self, key: &str) -> Option<String> { self.0.get_item(key) }
    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError("quota exceeded".to_owned()))
    }
}
