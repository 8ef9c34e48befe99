use std::collections::HashMap;
use std::sync::mpsc;

use crate::api::{ApiRequest, GameStateResponse, HTTP_UNAUTHORIZED, PlayerEntry};
use crate::error::ResponseError;
use crate::event::NotableEvent;
use crate::network::{OutgoingRequest, RequestId, RequestQueue, RequestResult, parse_ok};
use crate::player_table::{PlayerRow, player_rows};
use crate::poll::{MAX_POLLS_IN_FLIGHT, PollSequencer};
use crate::question::QuestionNumber;
use crate::session::{GameExtId, GameSession, HOME_PATH};
use crate::session_store::SessionStorage;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    // Session is present; polling the server on every tick.
    Polling,
    // Terminal. Either there was no session or the server stopped accepting it.
    RedirectHome,
}

#[derive(Clone, Copy, Debug)]
enum PendingRequest {
    Poll { seq: u64 },
    Buzz,
    ClearBuzz,
    SetQNum,
}

// Everything the game page knows, owned by one object per page load. The front-end calls
// `poll` on a timer, forwards user actions, and feeds every response to `process_response`.
pub struct GameViewState {
    session: Option<GameSession>,
    phase: ViewPhase,
    requests: RequestQueue,
    pending: HashMap<RequestId, PendingRequest>,
    polls: PollSequencer,
    q_num: QuestionNumber,
    players: Vec<PlayerEntry>,
}

impl GameViewState {
    pub fn new(storage: &impl SessionStorage, requests_tx: mpsc::Sender<OutgoingRequest>) -> Self {
        let session = GameSession::load(storage);
        let phase = match session {
            Some(ref session) => {
                log::info!("Game view for {}", session.game_ext_id);
                ViewPhase::Polling
            }
            None => {
                log::info!("No session found, going home");
                ViewPhase::RedirectHome
            }
        };
        GameViewState {
            session,
            phase,
            requests: RequestQueue::new(requests_tx),
            pending: HashMap::new(),
            polls: PollSequencer::new(),
            q_num: QuestionNumber::new(),
            players: Vec::new(),
        }
    }

    pub fn phase(&self) -> ViewPhase { self.phase }
    pub fn is_polling(&self) -> bool { self.phase == ViewPhase::Polling }
    pub fn game_ext_id(&self) -> Option<&GameExtId> {
        self.session.as_ref().map(|session| &session.game_ext_id)
    }
    pub fn has_game_state(&self) -> bool { self.polls.latest_applied().is_some() }

    // Last question number the server has confirmed. This is what should be displayed.
    pub fn q_num(&self) -> i64 { self.q_num.confirmed() }
    // Question number including local changes not yet confirmed.
    pub fn intended_q_num(&self) -> i64 { self.q_num.intended() }

    pub fn players(&self) -> &[PlayerEntry] { &self.players }
    pub fn player_rows(&self) -> Vec<PlayerRow> { player_rows(&self.players) }

    // What to do right after construction, before the first tick.
    pub fn initial_event(&self) -> NotableEvent {
        match self.phase {
            ViewPhase::Polling => NotableEvent::None,
            ViewPhase::RedirectHome => NotableEvent::Navigate(HOME_PATH.to_owned()),
        }
    }

    // Returns `None` once the view has gone home, and also while the server is sitting on
    // too many earlier polls.
    pub fn poll(&mut self) -> Option<RequestId> {
        let session = self.active_session()?;
        let polls_in_flight = self.polls_in_flight();
        if polls_in_flight >= MAX_POLLS_IN_FLIGHT {
            log::debug!("Skipping poll: {polls_in_flight} still unanswered");
            return None;
        }
        let request = ApiRequest::GameState {
            game_ext_id: session.game_ext_id.clone(),
            session_key: session.session_key.clone(),
        };
        let seq = self.polls.issue();
        Some(self.send(request, PendingRequest::Poll { seq }))
    }

    pub fn buzz(&mut self) -> Option<RequestId> {
        let session = self.active_session()?;
        let request = ApiRequest::Buzz {
            game_ext_id: session.game_ext_id.clone(),
            session_key: session.session_key.clone(),
        };
        Some(self.send(request, PendingRequest::Buzz))
    }

    pub fn clear_buzz(&mut self) -> Option<RequestId> {
        let session = self.active_session()?;
        let request = ApiRequest::ClearBuzz {
            game_ext_id: session.game_ext_id.clone(),
            session_key: session.session_key.clone(),
        };
        Some(self.send(request, PendingRequest::ClearBuzz))
    }

    pub fn q_num_up(&mut self) -> Option<RequestId> { self.change_q_num(1) }
    pub fn q_num_down(&mut self) -> Option<RequestId> { self.change_q_num(-1) }

    fn change_q_num(&mut self, delta: i64) -> Option<RequestId> {
        let session = self.active_session()?;
        let q_num = self.q_num.target(delta);
        let request = ApiRequest::SetQNum {
            game_ext_id: session.game_ext_id.clone(),
            session_key: session.session_key.clone(),
            q_num,
        };
        let poll_epoch = self.polls.next_seq();
        let id = self.send(request, PendingRequest::SetQNum);
        self.q_num.track(id, q_num, poll_epoch);
        Some(id)
    }

    pub fn process_response(&mut self, id: RequestId, result: RequestResult) -> NotableEvent {
        if self.phase == ViewPhase::RedirectHome {
            return NotableEvent::None;
        }
        let Some(pending) = self.pending.remove(&id) else {
            log::warn!("Ignoring response to unknown request {id:?}");
            return NotableEvent::None;
        };
        match pending {
            PendingRequest::Poll { seq } => self.process_poll(seq, result),
            PendingRequest::Buzz => {
                log_action_result("buzz", &result);
                NotableEvent::None
            }
            PendingRequest::ClearBuzz => {
                log_action_result("clearbuzz", &result);
                NotableEvent::None
            }
            PendingRequest::SetQNum => {
                if log_action_result("set_q_num", &result) {
                    if self.q_num.acknowledge(id) {
                        return NotableEvent::GameUpdated;
                    }
                } else {
                    self.q_num.reject(id);
                }
                NotableEvent::None
            }
        }
    }

    fn process_poll(&mut self, seq: u64, result: RequestResult) -> NotableEvent {
        match parse_ok::<GameStateResponse>(&result) {
            Ok(state) => {
                if !self.polls.accept(seq) {
                    log::debug!("Dropping stale game state #{seq}");
                    return NotableEvent::None;
                }
                log::debug!("Game state #{seq}: {state:?}");
                self.q_num.set_from_poll(seq, state.q_num);
                self.players = state.player_list;
                NotableEvent::GameUpdated
            }
            Err(ResponseError::Status(HTTP_UNAUTHORIZED)) => {
                log::info!("Session rejected by the server, going home");
                self.redirect_home()
            }
            Err(err) => {
                log::warn!("There was a problem with the game state request: {err}");
                NotableEvent::None
            }
        }
    }

    fn redirect_home(&mut self) -> NotableEvent {
        self.phase = ViewPhase::RedirectHome;
        self.pending.clear();
        NotableEvent::Navigate(HOME_PATH.to_owned())
    }

    fn active_session(&self) -> Option<&GameSession> {
        match self.phase {
            ViewPhase::Polling => self.session.as_ref(),
            ViewPhase::RedirectHome => None,
        }
    }

    fn polls_in_flight(&self) -> usize {
        self.pending.values().filter(|p| matches!(p, PendingRequest::Poll { .. })).count()
    }

    fn send(&mut self, request: ApiRequest, pending: PendingRequest) -> RequestId {
        let id = self.requests.send(request);
        self.pending.insert(id, pending);
        id
    }
}

// Actions are fire-and-forget: the outcome only goes to the log.
fn log_action_result(name: &str, result: &RequestResult) -> bool {
    match result {
        Ok(response) if response.is_ok() => {
            log::debug!("{name} response: {}", response.body);
            true
        }
        Ok(response) => {
            log::warn!("{name} failed: {}", response.status);
            false
        }
        Err(err) => {
            log::warn!("{name} failed: {err}");
            false
        }
    }
}
