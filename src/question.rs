use std::collections::HashMap;

use crate::network::RequestId;


// Question number as seen by the client.
//
// `confirmed` is what the server has acknowledged (directly or through a poll) and is the
// only value ever displayed. `intended` is where local up/down clicks have taken it; it runs
// ahead of `confirmed` while set requests are in flight and falls back on failure.
//
// Polls and set requests race each other, so every confirmation is ordered by when its
// request was issued: a set issued with poll epoch `e` is older than poll `e` and every later
// poll, and newer than all polls before it. An older confirmation never replaces a newer one.
#[derive(Clone, Debug, Default)]
pub struct QuestionNumber {
    confirmed: i64,
    // Chain of local changes, oldest first. Each one was computed from the previous one.
    in_flight: Vec<(RequestId, i64)>,
    // All set requests without a response yet, including ones dropped from the chain.
    outstanding: HashMap<RequestId, PendingSet>,
    latest_poll: Option<u64>,
    latest_acknowledged: Option<(RequestId, u64)>,
}

#[derive(Clone, Copy, Debug)]
struct PendingSet {
    value: i64,
    poll_epoch: u64,
}

impl QuestionNumber {
    pub fn new() -> Self { Self::default() }

    pub fn confirmed(&self) -> i64 { self.confirmed }

    pub fn intended(&self) -> i64 {
        self.in_flight.last().map_or(self.confirmed, |&(_, value)| value)
    }

    pub fn has_changes_in_flight(&self) -> bool { !self.in_flight.is_empty() }

    pub fn target(&self, delta: i64) -> i64 { self.intended() + delta }

    // `poll_epoch` is the sequence number the next poll will get.
    pub fn track(&mut self, id: RequestId, value: i64, poll_epoch: u64) {
        self.in_flight.push((id, value));
        self.outstanding.insert(id, PendingSet { value, poll_epoch });
    }

    // Value reported by poll `seq`. Polls arrive here already filtered to newest-first, so
    // the only thing that can outrank one is a set issued after it.
    pub fn set_from_poll(&mut self, seq: u64, value: i64) -> bool {
        self.latest_poll = Some(seq);
        if self.latest_acknowledged.is_some_and(|(_, epoch)| epoch > seq) {
            return false;
        }
        self.commit(value)
    }

    // Returns whether the confirmed value changed.
    pub fn acknowledge(&mut self, id: RequestId) -> bool {
        let Some(set) = self.outstanding.remove(&id) else {
            return false;
        };
        // Everything clicked before this change is superseded by it.
        self.in_flight.retain(|&(in_flight_id, _)| in_flight_id > id);
        if self.latest_acknowledged.is_some_and(|(latest, _)| id < latest) {
            return false;
        }
        if self.latest_poll.is_some_and(|seq| seq >= set.poll_epoch) {
            // A poll sent after this change has already reported the server state.
            return false;
        }
        self.latest_acknowledged = Some((id, set.poll_epoch));
        self.commit(set.value)
    }

    // Drops the failed change and everything built on top of it, so `intended` reverts to
    // the value before it.
    pub fn reject(&mut self, id: RequestId) {
        self.outstanding.remove(&id);
        if let Some(pos) = self.in_flight.iter().position(|&(in_flight_id, _)| in_flight_id == id) {
            self.in_flight.truncate(pos);
        }
    }

    fn commit(&mut self, value: i64) -> bool {
        let changed = self.confirmed != value;
        self.confirmed = value;
        changed
    }
}
