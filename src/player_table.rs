use itertools::Itertools;

use crate::api::PlayerEntry;


// One rendered line of the player list. Rows keep the server order: buzz order is shown,
// never used for sorting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRow {
    pub username: String,
    // Empty if the player hasn't buzzed.
    pub buzz_order: String,
}

impl From<&PlayerEntry> for PlayerRow {
    fn from(player: &PlayerEntry) -> Self {
        PlayerRow {
            username: player.username.clone(),
            buzz_order: player.buzz_order.map(|order| order.to_string()).unwrap_or_default(),
        }
    }
}

pub fn player_rows(players: &[PlayerEntry]) -> Vec<PlayerRow> {
    players.iter().map(PlayerRow::from).collect_vec()
}
