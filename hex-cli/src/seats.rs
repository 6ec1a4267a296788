//! Seat selection - which kind of player sits on each side
//!
//! Level 3 - Player construction

use std::fmt;
use std::str::FromStr;

use indicatif::{ProgressBar, ProgressStyle};

use hex_core::{HexBoard, HexError, Player};
use hex_mc::{MonteCarloConfig, MonteCarloPlayer, RandomPlayer};

use crate::human::{HumanPlayer, SharedInput};

/// Player kind as named on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
    Random,
}

impl FromStr for PlayerKind {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "h" => Ok(PlayerKind::Human),
            "computer" | "ai" | "c" => Ok(PlayerKind::Computer),
            "random" | "r" => Ok(PlayerKind::Random),
            _ => Err(HexError::InvalidPlayer(s.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Human => "human",
            PlayerKind::Computer => "computer",
            PlayerKind::Random => "random",
        };
        write!(f, "{}", name)
    }
}

/// One seat at the table
///
/// The computer variant reports thinking progress on stderr.
pub enum Seat {
    Human(HumanPlayer),
    Computer(MonteCarloPlayer),
    Random(RandomPlayer),
}

impl Seat {
    /// Build the player for `kind` on seat `number` (1 or 2)
    pub fn create(
        kind: PlayerKind,
        number: u8,
        dim: usize,
        config: &MonteCarloConfig,
        input: &SharedInput,
    ) -> Result<Self, HexError> {
        let name = format!("Player{}", number);
        // Seeded runs give each seat its own stream
        let seat_seed = config.seed.map(|s| s.wrapping_add(number as u64));
        let seat = match kind {
            PlayerKind::Human => Seat::Human(HumanPlayer::new(name, input.clone())),
            PlayerKind::Computer => {
                let mut config = config.clone();
                config.seed = seat_seed;
                Seat::Computer(MonteCarloPlayer::new(name, dim, config)?)
            }
            PlayerKind::Random => {
                let seed = seat_seed.unwrap_or_else(rand::random);
                Seat::Random(RandomPlayer::new(name, seed))
            }
        };
        Ok(seat)
    }

    fn player(&self) -> &dyn Player {
        match self {
            Seat::Human(p) => p,
            Seat::Computer(p) => p,
            Seat::Random(p) => p,
        }
    }
}

impl Player for Seat {
    fn name(&self) -> &str {
        self.player().name()
    }

    fn is_interactive(&self) -> bool {
        self.player().is_interactive()
    }

    fn play(&mut self, board: &HexBoard) -> (i32, i32) {
        match self {
            Seat::Human(p) => p.play(board),
            Seat::Random(p) => p.play(board),
            Seat::Computer(p) => {
                let bar = thinking_bar(p.name(), board.free_vertices().len());
                let mv = p.best_move_with_progress(board, |done, _| bar.set_position(done as u64));
                bar.finish_and_clear();
                mv
            }
        }
    }

    fn reset(&mut self, board: &HexBoard) {
        match self {
            Seat::Human(p) => p.reset(board),
            Seat::Computer(p) => p.reset(board),
            Seat::Random(p) => p.reset(board),
        }
    }
}

/// Progress bar counting scored candidates
fn thinking_bar(name: &str, candidates: usize) -> ProgressBar {
    let bar = ProgressBar::new(candidates as u64);
    if let Ok(style) = ProgressStyle::with_template("{msg} thinking... {percent}%") {
        bar.set_style(style);
    }
    bar.set_message(name.to_string());
    bar
}
