//! ChaCha8 generator backend.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::DrawU32;

pub struct ChaCha {
    rng: ChaCha8Rng,
}

impl ChaCha {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DrawU32 for ChaCha {
    fn draw_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
