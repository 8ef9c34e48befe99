use std::time::Duration;


pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

// Ticks are skipped while this many polls are still waiting for a response.
pub const MAX_POLLS_IN_FLIGHT: usize = 10;

// Poll requests are fired on a timer without waiting for the previous one, so responses
// can come back in any order. Each poll gets a sequence number and only a response newer
// than everything applied so far may update the view.
#[derive(Clone, Debug, Default)]
pub struct PollSequencer {
    next_seq: u64,
    latest_applied: Option<u64>,
}

impl PollSequencer {
    pub fn new() -> Self { Self::default() }

    pub fn issue(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // Sequence number the next `issue` will return.
    pub fn next_seq(&self) -> u64 { self.next_seq }

    // Returns whether the response should be applied. Marks it as applied if so.
    pub fn accept(&mut self, seq: u64) -> bool {
        if self.latest_applied.is_some_and(|latest| seq <= latest) {
            return false;
        }
        self.latest_applied = Some(seq);
        true
    }

    pub fn latest_applied(&self) -> Option<u64> { self.latest_applied }
}
