//! Flat Monte Carlo move selection
//!
//! ## Decision
//! For every free cell, pretend we play it, then complete the rest of the
//! board at random `trials` times and count how often we end up connected.
//! The cell with the most wins is played. Trial count is the same for every
//! candidate, so raw counts are compared directly.
//!
//! ## Playout
//! A random completion is a shuffle of the remaining free cells, colored
//! opponent, us, opponent, ... in shuffled order. A full Hex board always has
//! exactly one winner, so a single victory check per trial decides it.
//! Playouts run on a private scratch board and are undone cell by cell.

use std::time::{SystemTime, UNIX_EPOCH};

use hex_core::{Color, HexBoard, HexError, Player, VertId};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MonteCarloConfig;

// ============================================================================
// MONTE CARLO PLAYER
// ============================================================================

/// Computer player scoring every legal move by random playouts
pub struct MonteCarloPlayer {
    name: String,
    config: MonteCarloConfig,
    /// Shared by all trials of all decisions; never reseeded
    rng: ChaCha8Rng,
    /// Playout board, same dimension as the game board
    scratch: HexBoard,
}

impl MonteCarloPlayer {
    /// Create a player for boards of playable dimension `dim`
    pub fn new(name: impl Into<String>, dim: usize, config: MonteCarloConfig) -> Result<Self, HexError> {
        let seed = config.seed.unwrap_or_else(clock_seed);

        if config.parallel && !cfg!(feature = "parallel") {
            tracing::warn!("Parallel scoring requested but the `parallel` feature is disabled");
        }

        Ok(Self {
            name: name.into(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            scratch: HexBoard::new(dim)?,
            config,
        })
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Change playouts per candidate for subsequent decisions
    pub fn set_trials(&mut self, trials: u32) {
        self.config.trials = trials;
    }

    /// Playout board, for inspection
    pub fn scratch(&self) -> &HexBoard {
        &self.scratch
    }

    /// Pick a move for the side to play on `board`
    pub fn best_move(&mut self, board: &HexBoard) -> (i32, i32) {
        self.best_move_with_progress(board, |_, _| {})
    }

    /// Pick a move, calling `progress(done, total)` after each candidate
    ///
    /// Panics if the board has no free cell.
    pub fn best_move_with_progress<F>(&mut self, board: &HexBoard, mut progress: F) -> (i32, i32)
    where
        F: FnMut(usize, usize),
    {
        let free = board.free_vertices();
        assert!(!free.is_empty(), "no free cell left to play");

        self.ensure_scratch(board);

        let scores = self.score_candidates(board, &free, &mut progress);
        let (best, wins) = pick_best(free.iter().copied().zip(scores.iter().copied()));

        if wins == 0 {
            tracing::warn!(
                "{}: no candidate won a single playout, taking the first free cell",
                self.name
            );
        }

        let (row, col) = board.vertex_to_row_col(best);
        tracing::debug!(
            "{} plays ({}, {}): {}/{} wins, {} candidates",
            self.name,
            row,
            col,
            wins,
            self.config.trials,
            free.len()
        );

        (row, col)
    }

    /// Count playout wins for the side to move if it plays `fixed`
    ///
    /// `free` is the full list of free cells, including `fixed`. The scratch
    /// board is left exactly as it was found.
    pub fn simulate(&mut self, board: &HexBoard, fixed: VertId, free: &[VertId]) -> u32 {
        self.ensure_scratch(board);
        run_trials(&mut self.scratch, board, fixed, free, self.config.trials, &mut self.rng)
    }

    // ========================================================================
    // CANDIDATE SCORING
    // ========================================================================

    fn score_candidates<F>(&mut self, board: &HexBoard, free: &[VertId], progress: &mut F) -> Vec<u32>
    where
        F: FnMut(usize, usize),
    {
        if let Some(scores) = self.parallel_scores(board, free) {
            progress(free.len(), free.len());
            return scores;
        }

        let mut scores = Vec::with_capacity(free.len());
        for (i, &candidate) in free.iter().enumerate() {
            let wins = run_trials(
                &mut self.scratch,
                board,
                candidate,
                free,
                self.config.trials,
                &mut self.rng,
            );
            tracing::trace!("candidate {}: {} wins", candidate, wins);
            scores.push(wins);
            progress(i + 1, free.len());
        }
        scores
    }

    #[cfg(feature = "parallel")]
    fn parallel_scores(&mut self, board: &HexBoard, free: &[VertId]) -> Option<Vec<u32>> {
        if !self.config.parallel {
            return None;
        }
        let master_seed: u64 = self.rng.gen();
        Some(crate::parallel::score_candidates(board, free, self.config.trials, master_seed))
    }

    #[cfg(not(feature = "parallel"))]
    fn parallel_scores(&mut self, _board: &HexBoard, _free: &[VertId]) -> Option<Vec<u32>> {
        None
    }

    /// Rebuild the scratch board if the game board changed dimension
    fn ensure_scratch(&mut self, board: &HexBoard) {
        if self.scratch.node_count() != board.node_count() {
            tracing::debug!(
                "{}: resizing scratch board to {}x{}",
                self.name,
                board.playable_dim(),
                board.playable_dim()
            );
            self.scratch = board.clone();
        }
    }
}

impl Player for MonteCarloPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn play(&mut self, board: &HexBoard) -> (i32, i32) {
        self.best_move(board)
    }
}

// ============================================================================
// PLAYOUTS
// ============================================================================

/// Run `trials` random completions after `fixed` and count wins for the side
/// to move on `board`
pub(crate) fn run_trials<R: Rng>(
    scratch: &mut HexBoard,
    board: &HexBoard,
    fixed: VertId,
    free: &[VertId],
    trials: u32,
    rng: &mut R,
) -> u32 {
    let mut rest: Vec<VertId> = free.iter().copied().filter(|&v| v != fixed).collect();

    scratch.clone_board_state(board);
    let me = board.current_color();
    let op = me.opponent();
    scratch.set_vertex_key(fixed, me);

    let mut wins = 0;
    for _ in 0..trials {
        rest.shuffle(rng);

        for (i, &v) in rest.iter().enumerate() {
            scratch.set_vertex_key(v, if i % 2 == 0 { op } else { me });
        }

        if scratch.is_victory(me) {
            wins += 1;
        }

        for &v in &rest {
            scratch.set_vertex_key(v, Color::White);
        }
    }

    scratch.set_vertex_key(fixed, Color::White);
    wins
}

/// Highest score, keeping the earliest candidate on ties
pub(crate) fn pick_best<I>(scores: I) -> (VertId, u32)
where
    I: IntoIterator<Item = (VertId, u32)>,
{
    let mut best: Option<(VertId, u32)> = None;
    for (candidate, wins) in scores {
        match best {
            Some((_, hi)) if wins <= hi => {}
            _ => best = Some((candidate, wins)),
        }
    }
    best.expect("at least one candidate")
}

/// Seed derived from the wall clock
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================
