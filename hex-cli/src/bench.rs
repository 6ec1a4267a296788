//! Bench command - time Monte Carlo decisions
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: time_decisions(), report_results()
//! - Level 4: formatting utilities

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use clap::Args;

use hex_core::HexBoard;
use hex_mc::{MonteCarloConfig, MonteCarloPlayer, DEFAULT_TRIALS};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Playable board dimension (at least 3)
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Monte Carlo playouts per candidate move
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: u32,

    /// Number of consecutive decisions to time
    #[arg(long, default_value = "5")]
    pub moves: usize,

    /// Score candidates in parallel (needs the `parallel` feature)
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Timing of one decision
#[derive(Clone, Debug)]
struct MoveTiming {
    row: i32,
    col: i32,
    candidates: usize,
    elapsed: Duration,
}

impl MoveTiming {
    fn playouts_per_second(&self, trials: u32) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.candidates as u64 * trials as u64) as f64 / secs
        } else {
            0.0
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bench command
///
/// The engine plays both sides so each timed decision starts from the
/// position left by the previous one.
pub fn run(args: BenchArgs, seed: Option<u64>) -> Result<()> {
    ensure!(args.moves > 0, "moves must be positive");

    let mut config = MonteCarloConfig::with_trials(args.trials).with_parallel(args.parallel);
    config.seed = seed;
    config.validate()?;

    tracing::info!(
        "Timing {} decisions on {}x{} ({} trials)",
        args.moves,
        args.size,
        args.size,
        args.trials
    );

    let timings = time_decisions(args.size, args.moves, config)?;

    if args.json {
        print_json_results(&timings, &args);
    } else {
        print_text_results(&timings, &args);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play up to `moves` engine decisions, stopping early if the game ends
fn time_decisions(dim: usize, moves: usize, config: MonteCarloConfig) -> Result<Vec<MoveTiming>> {
    let mut board = HexBoard::new(dim)?;
    let mut player = MonteCarloPlayer::new("bench", dim, config)?;
    let mut timings = Vec::with_capacity(moves);

    for _ in 0..moves {
        let candidates = board.free_vertices().len();
        let start = Instant::now();
        let (row, col) = player.best_move(&board);
        let elapsed = start.elapsed();

        tracing::debug!("({}, {}) in {:.2}ms", row, col, elapsed.as_secs_f64() * 1000.0);
        timings.push(MoveTiming {
            row,
            col,
            candidates,
            elapsed,
        });

        if board.play(row, col).is_win() {
            break;
        }
    }

    Ok(timings)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn total_time(timings: &[MoveTiming]) -> Duration {
    timings.iter().map(|t| t.elapsed).sum()
}

fn print_json_results(timings: &[MoveTiming], args: &BenchArgs) {
    #[derive(serde::Serialize)]
    struct JsonMove {
        row: i32,
        col: i32,
        candidates: usize,
        time_ms: f64,
        playouts_per_second: f64,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        size: usize,
        trials: u32,
        total_time_ms: f64,
        avg_move_ms: f64,
        moves: Vec<JsonMove>,
    }

    let total_ms = total_time(timings).as_secs_f64() * 1000.0;
    let output = JsonOutput {
        size: args.size,
        trials: args.trials,
        total_time_ms: total_ms,
        avg_move_ms: total_ms / timings.len().max(1) as f64,
        moves: timings
            .iter()
            .map(|t| JsonMove {
                row: t.row,
                col: t.col,
                candidates: t.candidates,
                time_ms: t.elapsed.as_secs_f64() * 1000.0,
                playouts_per_second: t.playouts_per_second(args.trials),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(timings: &[MoveTiming], args: &BenchArgs) {
    println!("\n=== Decision Timing ({}x{}, {} trials) ===", args.size, args.size, args.trials);
    println!("| Move | Cell | Candidates | Time | Playouts/sec |");
    println!("|------|------|------------|------|--------------|");
    for (i, t) in timings.iter().enumerate() {
        println!(
            "| {} | ({}, {}) | {} | {:.2}ms | {:.0} |",
            i + 1,
            t.row,
            t.col,
            t.candidates,
            t.elapsed.as_secs_f64() * 1000.0,
            t.playouts_per_second(args.trials)
        );
    }

    let total_ms = total_time(timings).as_secs_f64() * 1000.0;
    println!("\nTotal: {:.2}ms, avg {:.2}ms per move", total_ms, total_ms / timings.len().max(1) as f64);
}

// ============================================================================
// TESTS
// ============================================================================
