#![cfg_attr(feature = "strict", deny(warnings))]

extern crate console_error_panic_hook;
extern crate wasm_bindgen;

extern crate buzzer;

pub mod web_document;
pub mod web_element_ext;
pub mod web_error_handling;
pub mod web_fetch;
pub mod web_game_view;
pub mod web_landing;
pub mod web_storage;
pub mod web_util;

use wasm_bindgen::prelude::*;

use crate::web_error_handling::{JsResult, set_panic_hook};


#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    // Fails only if a logger is already installed, which is fine.
    let _ = console_log::init_with_level(log::Level::Debug);
}

// Entry point for `index.html`.
#[wasm_bindgen]
pub fn run_landing_page() -> JsResult<()> { web_landing::run() }

// Entry point for `game.html`. Redirects home if this tab hasn't joined a game.
#[wasm_bindgen]
pub fn run_game_view() -> JsResult<()> { web_game_view::run() }
