//! Hex CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive game (human, computer or random on each seat)
//! - selfplay: Computer against computer, with match statistics
//! - bench: Time Monte Carlo decisions

mod bench;
mod human;
mod play;
mod seats;
mod selfplay;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hex")]
#[command(about = "Hex board game with a Monte Carlo computer player")]
struct Cli {
    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play::PlayArgs),
    /// Let the computer play itself
    Selfplay(selfplay::SelfplayArgs),
    /// Time Monte Carlo decisions
    Bench(bench::BenchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
        Commands::Bench(args) => bench::run(args, cli.seed),
    }
}
