//! Hex MC - Monte Carlo computer player
//!
//! This crate provides the automated players:
//! - Flat Monte Carlo move selection (random playouts per candidate)
//! - Optional rayon-parallel candidate scoring (`parallel` feature)
//! - A uniform random player

mod config;
mod engine;
#[cfg(feature = "parallel")]
pub mod parallel;
mod random_player;

pub use config::{MonteCarloConfig, DEFAULT_TRIALS};
pub use engine::MonteCarloPlayer;
pub use random_player::RandomPlayer;
