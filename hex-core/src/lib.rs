//! Hex Core - Board model and rules engine
//!
//! This crate provides the core game logic for Hex:
//! - Generic undirected weighted graph
//! - Hex board built on the graph, with colored margin walls
//! - Move legality and color-aware victory detection
//! - The player contract consumed by turn-loop drivers

pub mod graph;
pub mod color;
pub mod board;
pub mod player;
pub mod error;

// Re-exports for convenient access
pub use graph::{Graph, VertId};
pub use color::{Color, Outcome};
pub use board::HexBoard;
pub use player::Player;
pub use error::HexError;
