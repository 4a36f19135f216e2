//! Engine entry point: deal, spawn, race, join.
//!
//! One scoped thread per hand, all sharing the pile by reference. The
//! scope doubles as the join barrier: `run` returns only after every
//! worker has exhausted its hand, at which point each hand's window of
//! the deck is sorted and the sink has seen every card in ascending
//! order.

use std::thread;
use std::time::{Duration, Instant};

use derive_builder::Builder;

use crate::deal::{Deal, DealError};
use crate::hand::split_arena;
use crate::pile::{EventSink, Pile};
use crate::worker::{run_worker, SpinPolicy};

/// Parameters for one run of the race.
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct RunConfig {
    /// Worker thread count, one hand each.
    pub workers: usize,
    /// What a worker does between failed polls.
    pub spin_policy: SpinPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            spin_policy: SpinPolicy::Spin,
        }
    }
}

/// What a finished race looks like from the outside.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub cards: usize,
    pub workers: usize,
    pub elapsed: Duration,
}

/// Race `deck` onto a fresh pile.
///
/// Validates the configuration and deals the deck before any thread is
/// spawned, then runs one worker per hand and joins them all. On
/// success each hand's window of the deck is sorted in place and the
/// sink has observed every value in `0..deck.len()` exactly once, in
/// ascending order, each tagged with the worker that held it.
pub fn run<S: EventSink>(
    deck: &mut [u32],
    config: &RunConfig,
    sink: S,
) -> Result<(RunSummary, S), DealError> {
    let deal = Deal::new(deck.len(), config.workers)?;
    log::debug!(
        "dealt {} cards across {} hands",
        deal.deck_len(),
        deal.workers()
    );

    let pile = Pile::new(sink);
    let started = Instant::now();

    let mut panicked = 0usize;
    thread::scope(|s| {
        let handles: Vec<_> = deal
            .hands()
            .iter()
            .zip(split_arena(deck, &deal))
            .map(|(hand, view)| {
                let pile = &pile;
                let policy = config.spin_policy;
                let id = hand.id();
                s.spawn(move || run_worker(id, view, pile, policy))
            })
            .collect();

        for handle in handles {
            if handle.join().is_err() {
                panicked += 1;
            }
        }
    });

    if panicked > 0 {
        log::error!("{panicked} workers panicked mid-race");
        return Err(DealError::WorkerPanicked);
    }

    let summary = RunSummary {
        cards: deal.deck_len(),
        workers: deal.workers(),
        elapsed: started.elapsed(),
    };
    log::debug!(
        "race complete: {} cards in {:?}",
        summary.cards,
        summary.elapsed
    );

    Ok((summary, pile.into_sink()))
}
