// HTTP/JSON API spoken with the buzzer server. Every call is a POST with a JSON body.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::session::{GameExtId, SessionKey};


pub const CONTENT_TYPE: &str = "application/json; charset=UTF-8";
pub const HTTP_OK: u16 = 200;
pub const HTTP_UNAUTHORIZED: u16 = 401;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiRequest {
    Create {
        username: String,
    },
    Join {
        game_ext_id: GameExtId,
        username: String,
    },
    // Fetch current question number and player list.
    GameState {
        game_ext_id: GameExtId,
        session_key: SessionKey,
    },
    Buzz {
        game_ext_id: GameExtId,
        session_key: SessionKey,
    },
    ClearBuzz {
        game_ext_id: GameExtId,
        session_key: SessionKey,
    },
    SetQNum {
        game_ext_id: GameExtId,
        session_key: SessionKey,
        q_num: i64,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub session_key: SessionKey,
    pub game_ext_id: GameExtId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    pub session_key: SessionKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub username: String,
    // `None` until the player buzzes for the current question.
    #[serde(default)]
    pub buzz_order: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateResponse {
    pub q_num: i64,
    pub player_list: Vec<PlayerEntry>,
}

impl ApiRequest {
    pub fn path(&self) -> String {
        use ApiRequest::*;
        match self {
            Create { .. } => "/api/create".to_owned(),
            Join { game_ext_id, .. } => format!("/api/{game_ext_id}/join"),
            GameState { game_ext_id, .. } => format!("/api/{game_ext_id}"),
            Buzz { game_ext_id, .. } => format!("/api/{game_ext_id}/buzz"),
            ClearBuzz { game_ext_id, .. } => format!("/api/{game_ext_id}/clearbuzz"),
            SetQNum { game_ext_id, .. } => format!("/api/{game_ext_id}/set_q_num"),
        }
    }

    pub fn body(&self) -> serde_json::Value {
        use ApiRequest::*;
        match self {
            Create { username } | Join { username, .. } => json!({ "username": username }),
            GameState { session_key, .. }
            | Buzz { session_key, .. }
            | ClearBuzz { session_key, .. } => json!({ "session_key": session_key }),
            SetQNum { session_key, q_num, .. } => {
                json!({ "session_key": session_key, "q_num": q_num })
            }
        }
    }

    pub fn body_string(&self) -> String { self.body().to_string() }

    // Short name for logs.
    pub fn name(&self) -> &'static str {
        use ApiRequest::*;
        match self {
            Create { .. } => "create",
            Join { .. } => "join",
            GameState { .. } => "game_state",
            Buzz { .. } => "buzz",
            ClearBuzz { .. } => "clearbuzz",
            SetQNum { .. } => "set_q_num",
        }
    }
}
