//! Deck shuffling.
//!
//! One crate, two generator backends behind cargo features with the
//! same contract: a deterministic stream of `u32` draws per seed. The
//! `lcg` backend is the default; `chacha` swaps in a ChaCha8 stream.
//! Enabling both leaves `lcg` as the default generator.

#[cfg(feature = "chacha")]
pub mod chacha;
pub mod lcg;

/// Source of the raw draws behind a shuffle.
pub trait DrawU32 {
    fn draw_u32(&mut self) -> u32;
}

#[cfg(feature = "lcg")]
pub type DefaultRng = lcg::Lcg;

#[cfg(all(feature = "chacha", not(feature = "lcg")))]
pub type DefaultRng = chacha::ChaCha;

/// Deterministic permutation of `[0, n)` for a seed.
///
/// Fisher–Yates over an ascending deck, drawing from the default
/// generator backend. Same seed, same deck, every time.
#[cfg(any(feature = "lcg", feature = "chacha"))]
pub fn permutation(n: u32, seed: u64) -> Vec<u32> {
    shuffle_with(&mut DefaultRng::new(seed), n)
}

/// Fisher–Yates with a caller-chosen generator.
pub fn shuffle_with<R: DrawU32>(rng: &mut R, n: u32) -> Vec<u32> {
    let mut deck: Vec<u32> = (0..n).collect();
    for i in (1..deck.len()).rev() {
        let j = rng.draw_u32() as usize % (i + 1);
        deck.swap(i, j);
    }
    deck
}
