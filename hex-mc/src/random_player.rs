//! Uniform random player

use hex_core::{HexBoard, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks uniformly random coordinates without looking at the board, so its
/// moves may be rejected; the driver just asks again.
pub struct RandomPlayer {
    name: String,
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn play(&mut self, board: &HexBoard) -> (i32, i32) {
        let dim = board.playable_dim() as i32;
        (self.rng.gen_range(0..dim), self.rng.gen_range(0..dim))
    }
}
