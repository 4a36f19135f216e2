//! Per-worker control flow: sort the hand, then poll the pile.
//!
//! A worker moves through three phases. It sorts its own window of the
//! deck (no locking, the window is private), then polls the pile with
//! its smallest unplayed card until the hand is exhausted. What happens
//! between failed polls is the [`SpinPolicy`].

use std::hint;
use std::thread;

use crate::pile::{EventSink, Pile, WorkerId};

/// What a worker does after a failed poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPolicy {
    /// Busy-wait. Occupies one core per worker regardless of match
    /// frequency, in exchange for the lowest latency to the next match.
    /// Only sensible because the worker count is small and bounded.
    Spin,
    /// Yield to the OS scheduler after every failed poll.
    Yield,
    /// Spin with exponentially more pause hints, then start yielding.
    Backoff,
}

const BACKOFF_SPIN_LIMIT: u32 = 6;

/// Exponential backoff: doubling runs of pause hints up to
/// `2^BACKOFF_SPIN_LIMIT`, then a yield per failed poll.
struct Backoff {
    step: u32,
}

impl Backoff {
    fn new() -> Self {
        Self { step: 0 }
    }

    fn reset(&mut self) {
        self.step = 0;
    }

    fn wait(&mut self) {
        if self.step <= BACKOFF_SPIN_LIMIT {
            for _ in 0..(1u32 << self.step) {
                hint::spin_loop();
            }
            self.step += 1;
        } else {
            thread::yield_now();
        }
    }
}

/// Sort the hand's view, then play every card onto the pile in turn.
///
/// The sort completes before the first poll, and the view is only read
/// afterwards. The cursor is worker-local: nothing else ever advances
/// it, so testing `view[cursor]` outside the pile's lock is race-free;
/// the comparison that matters happens inside `try_consume`. Returns
/// once the hand is exhausted.
pub(crate) fn run_worker<S: EventSink>(
    id: WorkerId,
    view: &mut [u32],
    pile: &Pile<S>,
    policy: SpinPolicy,
) {
    view.sort_unstable();
    log::debug!("worker {id}: sorted {} cards", view.len());

    let mut backoff = Backoff::new();
    let mut cursor = 0;
    while cursor != view.len() {
        if pile.try_consume(id, view[cursor]) {
            cursor += 1;
            backoff.reset();
        } else {
            match policy {
                SpinPolicy::Spin => hint::spin_loop(),
                SpinPolicy::Yield => thread::yield_now(),
                SpinPolicy::Backoff => backoff.wait(),
            }
        }
    }

    log::debug!("worker {id}: hand exhausted");
}
