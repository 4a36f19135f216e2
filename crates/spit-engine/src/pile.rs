//! The shared pile: one counter every worker races to advance.
//!
//! All cross-worker state lives here. The match test, the event
//! emission, and the counter increment form a single critical section;
//! that is the whole synchronization story of the race.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Index of a worker within a run.
pub type WorkerId = usize;

/// One card played onto the pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchEvent {
    pub worker: WorkerId,
    pub value: u32,
}

/// Receives every played card, in play order.
///
/// `publish` is called from worker threads, inside the pile's critical
/// section, so implementations should stay short: whatever they do
/// extends the time every other worker spends waiting for the lock.
pub trait EventSink: Send {
    fn publish(&mut self, event: MatchEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn publish(&mut self, event: MatchEvent) {
        (**self).publish(event)
    }
}

/// Collector sink for tests and callers that want the full history.
impl EventSink for Vec<MatchEvent> {
    fn publish(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

struct PileState<S> {
    next_expected: u32,
    sink: S,
}

/// The next expected card plus the event sink, guarded by one mutex.
///
/// `next_expected` starts at 0, increases by exactly 1 per successful
/// [`try_consume`](Pile::try_consume), and at any instant equals the
/// number of events the sink has observed.
pub struct Pile<S> {
    state: Mutex<PileState<S>>,
}

impl<S: EventSink> Pile<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: Mutex::new(PileState {
                next_expected: 0,
                sink,
            }),
        }
    }

    /// Play `candidate` if it is the next expected card.
    ///
    /// The comparison, the emission, and the increment happen under one
    /// lock acquisition: two workers can never both observe a match for
    /// the same value, and the sink sees cards in exactly the order
    /// they were consumed.
    pub fn try_consume(&self, worker: WorkerId, candidate: u32) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if candidate != state.next_expected {
            return false;
        }
        state.sink.publish(MatchEvent {
            worker,
            value: candidate,
        });
        state.next_expected += 1;
        true
    }

    /// Next card due to be played, read under the lock.
    pub fn next_expected(&self) -> u32 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_expected
    }

    /// Tear the pile down and hand the sink back.
    pub fn into_sink(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_expected_card_is_consumed() {
        let pile = Pile::new(Vec::new());

        assert!(!pile.try_consume(0, 5));
        assert_eq!(pile.next_expected(), 0);

        assert!(pile.try_consume(0, 0));
        assert_eq!(pile.next_expected(), 1);

        // The same value can never be consumed twice.
        assert!(!pile.try_consume(1, 0));
        assert_eq!(pile.next_expected(), 1);
    }

    #[test]
    fn test_counter_always_equals_events_emitted() {
        let pile = Pile::new(Vec::new());
        let plays = [(0usize, 3u32), (1, 0), (0, 1), (1, 1), (1, 2), (0, 3)];

        let mut consumed = 0;
        for (worker, card) in plays {
            if pile.try_consume(worker, card) {
                consumed += 1;
            }
            assert_eq!(pile.next_expected(), consumed);
        }

        let events = pile.into_sink();
        assert_eq!(events.len() as u32, consumed);
    }

    #[test]
    fn test_events_record_worker_and_order() {
        let pile = Pile::new(Vec::new());
        assert!(pile.try_consume(2, 0));
        assert!(pile.try_consume(0, 1));
        assert!(pile.try_consume(1, 2));

        let events = pile.into_sink();
        assert_eq!(
            events,
            vec![
                MatchEvent { worker: 2, value: 0 },
                MatchEvent { worker: 0, value: 1 },
                MatchEvent { worker: 1, value: 2 },
            ]
        );
    }

    #[test]
    fn test_borrowed_sink() {
        let mut events = Vec::new();
        {
            let pile = Pile::new(&mut events);
            assert!(pile.try_consume(0, 0));
            assert!(!pile.try_consume(0, 2));
        }
        assert_eq!(events, vec![MatchEvent { worker: 0, value: 0 }]);
    }
}
