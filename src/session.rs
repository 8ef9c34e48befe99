use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session_store::{SessionStorage, StorageError};


pub const SESSION_KEY_ITEM: &str = "session_key";
pub const GAME_EXT_ID_ITEM: &str = "game_ext_id";

// Opaque credential issued by the server on create/join. Never inspected client-side.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

// Human-shareable game identifier used to build request paths.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameExtId(String);

impl SessionKey {
    pub fn new(s: impl Into<String>) -> Self { Self(s.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl GameExtId {
    pub fn new(s: impl Into<String>) -> Self { Self(s.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for GameExtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// Don't implement `Display` for `SessionKey`: it should not end up in logs by accident.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    pub session_key: SessionKey,
    pub game_ext_id: GameExtId,
}

impl GameSession {
    // Returns `None` unless both values are present.
    pub fn load(storage: &impl SessionStorage) -> Option<Self> {
        let session_key = storage.get_item(SESSION_KEY_ITEM)?;
        let game_ext_id = storage.get_item(GAME_EXT_ID_ITEM)?;
        Some(GameSession {
            session_key: SessionKey(session_key),
            game_ext_id: GameExtId(game_ext_id),
        })
    }

    pub fn store(&self, storage: &mut impl SessionStorage) -> Result<(), StorageError> {
        storage.set_item(SESSION_KEY_ITEM, self.session_key.as_str())?;
        storage.set_item(GAME_EXT_ID_ITEM, self.game_ext_id.as_str())
    }

    // Where the game view for this session lives.
    pub fn game_path(&self) -> String { game_path(&self.game_ext_id) }
}

pub fn game_path(game_ext_id: &GameExtId) -> String { format!("/{game_ext_id}") }

pub const HOME_PATH: &str = "/";
