//! Player contract shared by human and computer players

use crate::board::HexBoard;

/// A participant that picks moves for one side
///
/// Drivers hold one boxed player per seat, chosen once when the match is set
/// up, and only ever talk to it through this trait.
pub trait Player {
    /// Display name
    fn name(&self) -> &str;

    /// Whether rejected moves should be reported back and the game paused.
    /// Computer players simply get asked again.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Choose a move for the side to play on `board`, as playable (row, col).
    /// The result may still be rejected by `HexBoard::play`.
    fn play(&mut self, board: &HexBoard) -> (i32, i32);

    /// Clear per-match state before a new game on `board`
    fn reset(&mut self, _board: &HexBoard) {}
}
