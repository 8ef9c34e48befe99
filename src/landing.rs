use std::collections::HashMap;
use std::sync::mpsc;

use crate::api::{ApiRequest, CreateResponse, JoinResponse};
use crate::event::{NotableEvent, REQUEST_FAILED_MESSAGE};
use crate::network::{OutgoingRequest, RequestId, RequestQueue, RequestResult, parse_ok};
use crate::session::{GameExtId, GameSession};
use crate::session_store::SessionStorage;


#[derive(Clone, Debug)]
enum PendingRequest {
    Create,
    // Join responses don't echo the game, so remember which one was asked for.
    Join { game_ext_id: GameExtId },
}

// Create-or-join page. Nothing is written to storage until the server accepts the request.
pub struct LandingState<S> {
    storage: S,
    requests: RequestQueue,
    pending: HashMap<RequestId, PendingRequest>,
}

impl<S: SessionStorage> LandingState<S> {
    pub fn new(storage: S, requests_tx: mpsc::Sender<OutgoingRequest>) -> Self {
        LandingState {
            storage,
            requests: RequestQueue::new(requests_tx),
            pending: HashMap::new(),
        }
    }

    pub fn storage(&self) -> &S { &self.storage }
    pub fn into_storage(self) -> S { self.storage }
    pub fn has_pending_requests(&self) -> bool { !self.pending.is_empty() }

    pub fn join(&mut self, username: &str, game_ext_id: &str) -> RequestId {
        let username = username.trim().to_owned();
        let game_ext_id = GameExtId::new(game_ext_id.trim());
        log::info!("Joining game {game_ext_id} as {username:?}");
        let id = self.requests.send(ApiRequest::Join {
            game_ext_id: game_ext_id.clone(),
            username,
        });
        self.pending.insert(id, PendingRequest::Join { game_ext_id });
        id
    }

    pub fn create(&mut self, username: &str) -> RequestId {
        let username = username.trim().to_owned();
        log::info!("Creating a game as {username:?}");
        let id = self.requests.send(ApiRequest::Create { username });
        self.pending.insert(id, PendingRequest::Create);
        id
    }

    pub fn process_response(&mut self, id: RequestId, result: RequestResult) -> NotableEvent {
        let Some(pending) = self.pending.remove(&id) else {
            log::warn!("Ignoring response to unknown request {id:?}");
            return NotableEvent::None;
        };
        let session = match pending {
            PendingRequest::Create => {
                parse_ok::<CreateResponse>(&result).map(|resp| GameSession {
                    session_key: resp.session_key,
                    game_ext_id: resp.game_ext_id,
                })
            }
            PendingRequest::Join { game_ext_id } => {
                parse_ok::<JoinResponse>(&result).map(|resp| GameSession {
                    session_key: resp.session_key,
                    game_ext_id,
                })
            }
        };
        let session = match session {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Landing request failed: {err}");
                return NotableEvent::Alert(REQUEST_FAILED_MESSAGE.to_owned());
            }
        };
        if let Err(err) = session.store(&mut self.storage) {
            log::error!("Cannot save session: {err}");
            return NotableEvent::Alert(REQUEST_FAILED_MESSAGE.to_owned());
        }
        log::info!("Entered game {}", session.game_ext_id);
        NotableEvent::Navigate(session.game_path())
    }
}
