//! Parallel candidate scoring using rayon
//!
//! Each worker owns a scratch board; each candidate gets its own generator
//! seeded from `master_seed + index`, so scores depend only on the master
//! seed and the candidate order, not on scheduling. Ties still go to the
//! lowest candidate index.

use hex_core::{HexBoard, VertId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::engine::run_trials;

/// Score every candidate in `free`, in order
pub fn score_candidates(board: &HexBoard, free: &[VertId], trials: u32, master_seed: u64) -> Vec<u32> {
    free.par_iter()
        .enumerate()
        .map_init(
            || board.clone(),
            |scratch, (i, &candidate)| {
                let mut rng = ChaCha8Rng::seed_from_u64(master_seed.wrapping_add(i as u64));
                run_trials(scratch, board, candidate, free, trials, &mut rng)
            },
        )
        .collect()
}
