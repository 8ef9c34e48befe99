mod common;

use buzzer::api::ApiRequest;
use buzzer::event::NotableEvent;
use buzzer::game_view::{GameViewState, ViewPhase};
use buzzer::network::OutgoingRequest;
use buzzer::player_table::PlayerRow;
use buzzer::poll::MAX_POLLS_IN_FLIGHT;
use buzzer::session::{GameExtId, SessionKey};
use buzzer::session_store::{MemoryStorage, SessionStorage};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;


fn home() -> NotableEvent { NotableEvent::Navigate("/".to_owned()) }

fn game_view() -> (GameViewState, Outbox) {
    let (tx, outbox) = Outbox::new();
    let state = GameViewState::new(&storage_with_session("SKEYSKEY", "BASEMENT"), tx);
    (state, outbox)
}

fn row(username: &str, buzz_order: &str) -> PlayerRow {
    PlayerRow {
        username: username.to_owned(),
        buzz_order: buzz_order.to_owned(),
    }
}

fn single(outbox: &Outbox) -> OutgoingRequest {
    let mut sent = outbox.drain();
    assert_eq!(sent.len(), 1, "{sent:?}");
    sent.pop().unwrap()
}

#[test]
fn missing_session_goes_home_without_polling() {
    for storage in [
        MemoryStorage::new(),
        {
            let mut s = MemoryStorage::new();
            s.set_item("session_key", "K").unwrap();
            s
        },
        {
            let mut s = MemoryStorage::new();
            s.set_item("game_ext_id", "G").unwrap();
            s
        },
    ] {
        let (tx, outbox) = Outbox::new();
        let mut state = GameViewState::new(&storage, tx);
        assert_eq!(state.phase(), ViewPhase::RedirectHome);
        assert_eq!(state.initial_event(), home());
        assert_eq!(state.poll(), None);
        assert_eq!(state.buzz(), None);
        assert!(outbox.drain().is_empty());
    }
}

#[test]
fn poll_renders_players_and_question() {
    let (mut state, outbox) = game_view();
    assert_eq!(state.initial_event(), NotableEvent::None);
    let id = state.poll().unwrap();
    let sent = single(&outbox);
    assert_eq!(sent.id, id);
    assert_eq!(
        sent.request,
        ApiRequest::GameState {
            game_ext_id: GameExtId::new("BASEMENT"),
            session_key: SessionKey::new("SKEYSKEY"),
        }
    );
    assert_eq!(sent.request.body(), json!({ "session_key": "SKEYSKEY" }));

    let event = state.process_response(
        id,
        ok(json!({
            "q_num": 3,
            "player_list": [
                { "username": "alice", "buzz_order": 1 },
                { "username": "bob", "buzz_order": null },
            ],
        })),
    );
    assert_eq!(event, NotableEvent::GameUpdated);
    assert_eq!(state.q_num(), 3);
    assert_eq!(state.player_rows(), vec![row("alice", "1"), row("bob", "")]);
}

#[test]
fn every_poll_rebuilds_the_list() {
    let (mut state, _outbox) = game_view();
    let a = state.poll().unwrap();
    let players = json!([
        { "username": "carol", "buzz_order": 2 },
        { "username": "alice", "buzz_order": 1 },
        { "username": "bob" },
    ]);
    assert_eq!(
        state.process_response(a, ok(json!({ "q_num": 1, "player_list": players }))),
        NotableEvent::GameUpdated
    );
    assert_eq!(state.player_rows(), vec![row("carol", "2"), row("alice", "1"), row("bob", "")]);

    let b = state.poll().unwrap();
    assert_eq!(
        state.process_response(b, ok(json!({ "q_num": 1, "player_list": [] }))),
        NotableEvent::GameUpdated
    );
    assert!(state.player_rows().is_empty());
}

#[test]
fn unauthorized_poll_goes_home_and_stops_polling() {
    let (mut state, outbox) = game_view();
    let a = state.poll().unwrap();
    let b = state.poll().unwrap();
    let _ = outbox.drain();
    assert_eq!(state.process_response(b, status(401)), home());
    assert_eq!(state.phase(), ViewPhase::RedirectHome);
    assert_eq!(state.poll(), None);
    assert!(outbox.drain().is_empty());
    // In-flight responses no longer matter.
    assert_eq!(
        state.process_response(a, ok(json!({ "q_num": 9, "player_list": [] }))),
        NotableEvent::None
    );
    assert_eq!(state.q_num(), 0);
}

#[test]
fn other_poll_failures_keep_polling() {
    let (mut state, _outbox) = game_view();
    let a = state.poll().unwrap();
    assert_eq!(state.process_response(a, status(500)), NotableEvent::None);
    let b = state.poll().unwrap();
    assert_eq!(state.process_response(b, offline()), NotableEvent::None);
    let c = state.poll().unwrap();
    assert_eq!(state.process_response(c, ok(json!("not a game"))), NotableEvent::None);
    assert_eq!(state.phase(), ViewPhase::Polling);
    assert!(!state.has_game_state());
    assert!(state.poll().is_some());
}

#[test]
fn stale_poll_response_is_dropped() {
    let (mut state, _outbox) = game_view();
    let old = state.poll().unwrap();
    let new = state.poll().unwrap();
    assert_eq!(
        state.process_response(
            new,
            ok(json!({ "q_num": 5, "player_list": [{ "username": "alice", "buzz_order": 1 }] }))
        ),
        NotableEvent::GameUpdated
    );
    assert_eq!(
        state.process_response(old, ok(json!({ "q_num": 4, "player_list": [] }))),
        NotableEvent::None
    );
    assert_eq!(state.q_num(), 5);
    assert_eq!(state.player_rows(), vec![row("alice", "1")]);
}

#[test]
fn buzz_and_clear_are_fire_and_forget() {
    let (mut state, outbox) = game_view();
    let buzz = state.buzz().unwrap();
    let clear = state.clear_buzz().unwrap();
    let sent = outbox.drain();
    assert_eq!(sent.iter().map(|r| r.request.path()).collect::<Vec<_>>(), vec![
        "/api/BASEMENT/buzz",
        "/api/BASEMENT/clearbuzz"
    ]);
    assert_eq!(state.process_response(buzz, status(500)), NotableEvent::None);
    assert_eq!(state.process_response(clear, ok(json!({ "ok": true }))), NotableEvent::None);
    assert_eq!(state.phase(), ViewPhase::Polling);
}

#[test]
fn action_unauthorized_is_only_logged() {
    let (mut state, _outbox) = game_view();
    let buzz = state.buzz().unwrap();
    assert_eq!(state.process_response(buzz, status(401)), NotableEvent::None);
    assert_eq!(state.phase(), ViewPhase::Polling);
}

#[test]
fn q_num_up_then_down_is_net_zero() {
    let (mut state, outbox) = game_view();
    let before = state.intended_q_num();
    state.q_num_up().unwrap();
    state.q_num_down().unwrap();
    assert_eq!(state.intended_q_num(), before);
    let sent = outbox.drain_requests();
    assert_eq!(sent, vec![
        ApiRequest::SetQNum {
            game_ext_id: GameExtId::new("BASEMENT"),
            session_key: SessionKey::new("SKEYSKEY"),
            q_num: before + 1,
        },
        ApiRequest::SetQNum {
            game_ext_id: GameExtId::new("BASEMENT"),
            session_key: SessionKey::new("SKEYSKEY"),
            q_num: before,
        },
    ]);
}

#[test]
fn q_num_display_waits_for_confirmation() {
    let (mut state, _outbox) = game_view();
    let poll = state.poll().unwrap();
    let _ = state.process_response(poll, ok(json!({ "q_num": 3, "player_list": [] })));

    let up = state.q_num_up().unwrap();
    assert_eq!(state.q_num(), 3);
    assert_eq!(state.intended_q_num(), 4);
    assert_eq!(state.process_response(up, ok(json!({}))), NotableEvent::GameUpdated);
    assert_eq!(state.q_num(), 4);
    assert_eq!(state.intended_q_num(), 4);
}

#[test]
fn q_num_failure_reverts() {
    let (mut state, _outbox) = game_view();
    let poll = state.poll().unwrap();
    let _ = state.process_response(poll, ok(json!({ "q_num": 3, "player_list": [] })));

    let up = state.q_num_up().unwrap();
    assert_eq!(state.process_response(up, status(403)), NotableEvent::None);
    assert_eq!(state.q_num(), 3);
    assert_eq!(state.intended_q_num(), 3);

    let up = state.q_num_up().unwrap();
    assert_eq!(state.process_response(up, offline()), NotableEvent::None);
    assert_eq!(state.intended_q_num(), 3);
}

#[test]
fn poll_overrides_local_belief() {
    let (mut state, _outbox) = game_view();
    let up = state.q_num_up().unwrap();
    let _ = state.process_response(up, ok(json!({})));
    assert_eq!(state.q_num(), 1);
    // Somebody else moved the game to question 7.
    let poll = state.poll().unwrap();
    let _ = state.process_response(poll, ok(json!({ "q_num": 7, "player_list": [] })));
    assert_eq!(state.q_num(), 7);
    assert_eq!(state.intended_q_num(), 7);
    state.q_num_up().unwrap();
    assert_eq!(state.intended_q_num(), 8);
}

#[test]
fn q_num_newer_ack_first_continues_from_it() {
    let (mut state, outbox) = game_view();
    let poll = state.poll().unwrap();
    let _ = state.process_response(poll, ok(json!({ "q_num": 5, "player_list": [] })));
    let _up = state.q_num_up().unwrap();
    let down = state.q_num_down().unwrap();
    let _ = state.process_response(down, ok(json!({})));
    assert_eq!(state.q_num(), 5);
    assert_eq!(state.intended_q_num(), 5);

    let _ = outbox.drain();
    state.q_num_up().unwrap();
    let ApiRequest::SetQNum { q_num, .. } = single(&outbox).request else {
        panic!("expected set_q_num");
    };
    assert_eq!(q_num, 6);
}

#[test]
fn q_num_ack_after_newer_poll_is_not_displayed() {
    let (mut state, _outbox) = game_view();
    let poll = state.poll().unwrap();
    let _ = state.process_response(poll, ok(json!({ "q_num": 5, "player_list": [] })));
    let up = state.q_num_up().unwrap();
    // Somebody else jumped ahead and the next poll already shows it.
    let poll = state.poll().unwrap();
    assert_eq!(
        state.process_response(poll, ok(json!({ "q_num": 9, "player_list": [] }))),
        NotableEvent::GameUpdated
    );
    assert_eq!(state.process_response(up, ok(json!({}))), NotableEvent::None);
    assert_eq!(state.q_num(), 9);
    assert_eq!(state.intended_q_num(), 9);
}

#[test]
fn q_num_poll_sent_before_change_does_not_undo_it() {
    let (mut state, _outbox) = game_view();
    let first = state.poll().unwrap();
    let _ = state.process_response(first, ok(json!({ "q_num": 5, "player_list": [] })));
    let slow = state.poll().unwrap();
    let up = state.q_num_up().unwrap();
    assert_eq!(state.process_response(up, ok(json!({}))), NotableEvent::GameUpdated);
    assert_eq!(state.q_num(), 6);
    // The player list from the slow poll still applies; only its question number is outdated.
    let _ = state.process_response(
        slow,
        ok(json!({ "q_num": 5, "player_list": [{ "username": "alice", "buzz_order": 1 }] })),
    );
    assert_eq!(state.q_num(), 6);
    assert_eq!(state.player_rows(), vec![row("alice", "1")]);
}

#[test]
fn unanswered_polls_are_capped() {
    let (mut state, _outbox) = game_view();
    let first = state.poll().unwrap();
    for _ in 1..MAX_POLLS_IN_FLIGHT {
        state.poll().unwrap();
    }
    assert_eq!(state.poll(), None);
    assert_eq!(state.phase(), ViewPhase::Polling);

    let _ = state.process_response(first, offline());
    assert!(state.poll().is_some());
}
