//! Recoverable errors
//!
//! Broken internal invariants (bad vertex indices, mismatched board sizes)
//! panic instead; these variants cover input a caller can correct.

/// Errors raised while setting up a game or reading player input
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HexError {
    #[error("board dimension must be at least {min}, got {dim}")]
    InvalidDimension { dim: usize, min: usize },

    #[error("invalid move input '{0}': expected \"row col\"")]
    InvalidMove(String),

    #[error("unknown player kind '{0}' (expected human, computer or random)")]
    InvalidPlayer(String),
}
