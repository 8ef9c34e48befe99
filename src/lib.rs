#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod api;
pub mod error;
pub mod event;
pub mod game_view;
pub mod landing;
pub mod network;
pub mod player_table;
pub mod poll;
pub mod question;
pub mod session;
pub mod session_store;

pub use api::*;
pub use error::*;
pub use event::*;
pub use network::*;
pub use session::*;
pub use session_store::*;
