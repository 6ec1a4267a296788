//! Selfplay command - computer against computer
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hex_core::{HexBoard, Player};
use hex_mc::{MonteCarloConfig, MonteCarloPlayer, DEFAULT_TRIALS};

use crate::play::play_match;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Playable board dimension (at least 3)
    #[arg(long, default_value = "7")]
    pub size: usize,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Monte Carlo playouts per candidate move
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: u32,

    /// Score candidates in parallel (needs the `parallel` feature)
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    winner: u8,
    moves: usize,
    elapsed_ms: f64,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SelfplayResults {
    games: Vec<GameRecord>,
    p1_wins: usize,
    p2_wins: usize,
    avg_moves: f32,
    avg_move_ms: f64,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
///
/// 1. Play the requested number of games
/// 2. Report results
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    let config = MonteCarloConfig::with_trials(args.trials).with_parallel(args.parallel);
    config.validate()?;

    tracing::info!(
        "Starting selfplay: {} games on {}x{} ({} trials)",
        args.games,
        args.size,
        args.size,
        args.trials
    );

    let results = play_games(&args, &config, seed)?;

    if args.json {
        print_json_results(&results);
    } else {
        print_text_results(&results);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_games(args: &SelfplayArgs, config: &MonteCarloConfig, seed: Option<u64>) -> Result<SelfplayResults> {
    let mut rng = create_rng(seed);
    let mut board = HexBoard::new(args.size)?;
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        board.reset_board();
        let record = play_single_game(&mut board, config, game_num + 1, &mut rng)?;

        tracing::info!(
            "Game {}: Player{} wins ({} moves, {:.0}ms)",
            record.game_number,
            record.winner,
            record.moves,
            record.elapsed_ms
        );

        games.push(record);
    }

    Ok(compute_statistics(games))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(
    board: &mut HexBoard,
    config: &MonteCarloConfig,
    game_number: usize,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let dim = board.playable_dim();
    let p1 = MonteCarloPlayer::new("Player1", dim, config.clone().with_seed(rng.gen()))?;
    let p2 = MonteCarloPlayer::new("Player2", dim, config.clone().with_seed(rng.gen()))?;
    let mut seats: [Box<dyn Player>; 2] = [Box::new(p1), Box::new(p2)];

    let start = Instant::now();
    let record = play_match(board, &mut seats, false, None)?.context("game ended without a winner")?;

    Ok(GameRecord {
        game_number,
        winner: record.winner,
        moves: record.moves.len(),
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

fn compute_statistics(games: Vec<GameRecord>) -> SelfplayResults {
    let p1_wins = games.iter().filter(|g| g.winner == 1).count();
    let p2_wins = games.iter().filter(|g| g.winner == 2).count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let total_ms: f64 = games.iter().map(|g| g.elapsed_ms).sum();

    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };
    let avg_move_ms = if total_moves == 0 {
        0.0
    } else {
        total_ms / total_moves as f64
    };

    SelfplayResults {
        games,
        p1_wins,
        p2_wins,
        avg_moves,
        avg_move_ms,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(results: &SelfplayResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: u8,
        moves: usize,
        elapsed_ms: f64,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        p1_wins: usize,
        p2_wins: usize,
        p1_win_rate: f32,
        avg_moves: f32,
        avg_move_ms: f64,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        p1_wins: results.p1_wins,
        p2_wins: results.p2_wins,
        p1_win_rate: percent(results.p1_wins, total) / 100.0,
        avg_moves: results.avg_moves,
        avg_move_ms: results.avg_move_ms,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner,
                moves: g.moves,
                elapsed_ms: g.elapsed_ms,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &SelfplayResults) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ===");
    println!("Total games:   {}", total);
    println!("Player1 wins:  {} ({:.1}%)", results.p1_wins, percent(results.p1_wins, total));
    println!("Player2 wins:  {} ({:.1}%)", results.p2_wins, percent(results.p2_wins, total));
    println!("Avg moves:     {:.1}", results.avg_moves);
    println!("Avg move time: {:.2}ms", results.avg_move_ms);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: Player{} in {} moves",
            game.game_number, game.winner, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
