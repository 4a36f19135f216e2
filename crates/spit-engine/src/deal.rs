//! Deck partitioning.
//!
//! Splits `[0, N)` into one contiguous window per worker. Integer
//! division leaves `N - base * W` cards over; those go one apiece to
//! the last hands, so the first `W - remainder` hands hold `base`
//! cards and the rest hold `base + 1`.

use thiserror::Error;

use crate::hand::Hand;

/// Why a run could not be completed.
///
/// The configuration variants are reported before any worker is
/// spawned; `WorkerPanicked` is the one failure a running race can
/// surface, and it means a logic bug, not a recoverable condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DealError {
    #[error("worker count must be at least 1")]
    NoWorkers,
    #[error("deck must hold at least 1 card")]
    EmptyDeck,
    #[error("a worker panicked mid-race")]
    WorkerPanicked,
}

/// The full set of hand windows for one run.
#[derive(Debug, Clone)]
pub struct Deal {
    hands: Vec<Hand>,
    deck_len: usize,
}

impl Deal {
    /// Split a deck of `deck_len` cards across `workers` hands.
    ///
    /// Each hand starts where the previous one ended; the running
    /// offset (rather than `id * size` arithmetic) is what keeps the
    /// boundary between the base-sized group and the oversized group
    /// from drifting by one.
    pub fn new(deck_len: usize, workers: usize) -> Result<Self, DealError> {
        if workers == 0 {
            return Err(DealError::NoWorkers);
        }
        if deck_len == 0 {
            return Err(DealError::EmptyDeck);
        }

        let base = deck_len / workers;
        let remainder = deck_len - base * workers;
        let plain = workers - remainder;

        let mut hands = Vec::with_capacity(workers);
        let mut offset = 0;
        for id in 0..workers {
            let len = if id < plain { base } else { base + 1 };
            hands.push(Hand::new(id, offset, offset + len));
            offset += len;
        }

        // Coverage is an internal invariant, not a runtime condition.
        assert_eq!(offset, deck_len, "hand windows must cover the deck exactly");

        Ok(Self { hands, deck_len })
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn deck_len(&self) -> usize {
        self.deck_len
    }

    pub fn workers(&self) -> usize {
        self.hands.len()
    }
}
