//! Play command - interactive Hex matches
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), create_seats(), play_match(), ask_next(), select_kinds()
//! - Level 3: turn handling
//! - Level 4: input utilities (see human.rs)

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hex_core::{HexBoard, Outcome, Player};
use hex_mc::MonteCarloConfig;

use crate::human::{shared_input, LineInput, SharedInput};
use crate::seats::{PlayerKind, Seat};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Playable board dimension (at least 3)
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// First player, plays X and connects left to right
    #[arg(long, default_value = "human")]
    pub p1: PlayerKind,

    /// Second player, plays O and connects top to bottom
    #[arg(long, default_value = "computer")]
    pub p2: PlayerKind,

    /// Monte Carlo playouts per candidate move (overrides --config)
    #[arg(long)]
    pub trials: Option<u32>,

    /// Monte Carlo config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Score candidates in parallel (needs the `parallel` feature)
    #[arg(long)]
    pub parallel: bool,
}

/// Result of one finished game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    /// Winning player number (1 or 2)
    pub winner: u8,
    /// Accepted moves in order
    pub moves: Vec<(i32, i32)>,
    /// Moves the board refused
    pub rejected: usize,
}

/// What to do after a finished game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Next {
    Again,
    ChangePlayers,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the Monte Carlo config
/// 2. Seat both players
/// 3. Play matches until the user quits, reseating players on request
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(args.config.as_ref(), args.trials, seed, args.parallel)?;
    let input = shared_input(io::stdin().lock());

    let mut board = HexBoard::new(args.size)?;
    let mut seats = create_seats(args.p1, args.p2, args.size, &config, &input)?;

    tracing::info!(
        "Starting {}x{} game: {} vs {} ({} trials)",
        args.size,
        args.size,
        args.p1,
        args.p2,
        config.trials
    );

    loop {
        println!("{}", board);
        let Some(record) = play_match(&mut board, &mut seats, true, Some(&*input))? else {
            println!();
            tracing::info!("Input closed, leaving the game");
            return Ok(());
        };
        println!("{} wins after {} moves", seats[record.winner as usize - 1].name(), record.moves.len());

        match ask_next(&input)? {
            Next::Quit => break,
            Next::Again => {
                board.reset_board();
                for seat in seats.iter_mut() {
                    seat.reset(&board);
                }
            }
            Next::ChangePlayers => {
                let Some((p1, p2)) = select_kinds(&input)? else {
                    break;
                };
                board.reset_board();
                seats = create_seats(p1, p2, args.size, &config, &input)?;
                tracing::info!("New players: {} vs {}", p1, p2);
            }
        }
    }

    println!("\nThanks for playing! Bye!");
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config file (or defaults) with command-line overrides applied
pub fn build_config(
    path: Option<&PathBuf>,
    trials: Option<u32>,
    seed: Option<u64>,
    parallel: bool,
) -> Result<MonteCarloConfig> {
    let mut config = match path {
        Some(p) => MonteCarloConfig::load(p)?,
        None => MonteCarloConfig::default(),
    };

    if let Some(t) = trials {
        config.trials = t;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.parallel |= parallel;

    config.validate().context("Invalid Monte Carlo settings")?;
    Ok(config)
}

/// One boxed player per seat, chosen once per selection
fn create_seats(
    p1: PlayerKind,
    p2: PlayerKind,
    dim: usize,
    config: &MonteCarloConfig,
    input: &SharedInput,
) -> Result<[Box<dyn Player>; 2]> {
    let first = Seat::create(p1, 1, dim, config, input)?;
    let second = Seat::create(p2, 2, dim, config, input)?;
    Ok([Box::new(first), Box::new(second)])
}

/// Alternate turns until someone connects their sides
///
/// Players are asked again after a refused move. With `show` set the board is
/// printed after every accepted move. Returns None when a human player ran
/// out of `input`; a failed read is returned as the error.
pub fn play_match(
    board: &mut HexBoard,
    seats: &mut [Box<dyn Player>; 2],
    show: bool,
    input: Option<&LineInput>,
) -> Result<Option<GameRecord>> {
    let mut moves = Vec::new();
    let mut rejected = 0;

    loop {
        let idx = board.current_player() as usize - 1;
        let player = &mut seats[idx];
        let (row, col) = player.play(board);

        if let Some(input) = input {
            if input.check_closed().context("Failed to read move")? {
                return Ok(None);
            }
        }

        let outcome = board.play(row, col);

        if outcome.is_error() {
            rejected += 1;
            report_rejected(&**player, row, col, outcome);
            continue;
        }

        moves.push((row, col));
        tracing::debug!("{} played ({}, {})", player.name(), row, col);

        if show {
            println!("\n{} played ({}, {})\n{}", player.name(), row, col, board);
        }

        if let Some(winner) = outcome.winner() {
            return Ok(Some(GameRecord {
                winner,
                moves,
                rejected,
            }));
        }
    }
}

/// Ask whether to play again or reseat; end of input means quit
fn ask_next(input: &LineInput) -> Result<Next> {
    loop {
        prompt("\nContinue (y/n) or change players (c): ");
        let Some(line) = input.read_line().context("Failed to read answer")? else {
            return Ok(Next::Quit);
        };
        match line.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(Next::Again),
            "n" | "no" => return Ok(Next::Quit),
            "c" => return Ok(Next::ChangePlayers),
            _ => continue,
        }
    }
}

/// Read a player kind for each seat; None at end of input
fn select_kinds(input: &LineInput) -> Result<Option<(PlayerKind, PlayerKind)>> {
    let mut kinds = [PlayerKind::Human; 2];
    for (i, kind) in kinds.iter_mut().enumerate() {
        loop {
            prompt(&format!("Player{} (human/computer/random): ", i + 1));
            let Some(line) = input.read_line().context("Failed to read player kind")? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(k) => {
                    *kind = k;
                    break;
                }
                Err(e) => println!("{}", e),
            }
        }
    }
    Ok(Some((kinds[0], kinds[1])))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn report_rejected(player: &dyn Player, row: i32, col: i32, outcome: Outcome) {
    if player.is_interactive() {
        println!("Invalid move ({}, {}): {}", row, col, outcome);
    } else {
        tracing::trace!("{} retrying after ({}, {}): {}", player.name(), row, col, outcome);
    }
}

/// Print without a newline so the answer goes on the same line
fn prompt(text: &str) {
    print!("{}", text);
    io::stdout().flush().ok();
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::human::HumanPlayer;
    use std::io::{BufReader, Cursor, Read};

    /// Reader that always fails
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "terminal gone"))
        }
    }

    /// Replays a fixed list of moves
    struct Scripted {
        name: String,
        moves: Vec<(i32, i32)>,
        next: usize,
    }

    impl Scripted {
        fn boxed(name: &str, moves: &[(i32, i32)]) -> Box<dyn Player> {
            Box::new(Scripted {
                name: name.to_string(),
                moves: moves.to_vec(),
                next: 0,
            })
        }
    }

    impl Player for Scripted {
        fn name(&self) -> &str {
            &self.name
        }

        fn play(&mut self, _board: &HexBoard) -> (i32, i32) {
            let mv = self.moves[self.next];
            self.next += 1;
            mv
        }

        fn reset(&mut self, _board: &HexBoard) {
            self.next = 0;
        }
    }

    #[test]
    fn test_play_match_row_win() {
        let mut board = HexBoard::new(3).unwrap();
        let mut seats = [
            Scripted::boxed("Blue", &[(1, 1), (1, 0), (1, 2)]),
            Scripted::boxed("Red", &[(0, 0), (0, 2)]),
        ];

        let record = play_match(&mut board, &mut seats, false, None).unwrap().unwrap();
        assert_eq!(record.winner, 1);
        assert_eq!(record.moves, vec![(1, 1), (0, 0), (1, 0), (0, 2), (1, 2)]);
        assert_eq!(record.rejected, 0);
    }

    #[test]
    fn test_play_match_counts_rejected_moves() {
        let mut board = HexBoard::new(3).unwrap();
        let mut seats = [
            Scripted::boxed("Blue", &[(0, 0), (2, 2), (5, 5), (1, 1), (2, 0)]),
            Scripted::boxed("Red", &[(0, 0), (-1, 0), (0, 1), (1, 1), (2, 1)]),
        ];

        let record = play_match(&mut board, &mut seats, false, None).unwrap().unwrap();
        // Red takes column 1 top to bottom
        assert_eq!(record.winner, 2);
        assert_eq!(record.rejected, 4);
        assert_eq!(record.moves, vec![(0, 0), (0, 1), (2, 2), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_build_config_overrides() {
        let config = build_config(None, Some(25), Some(7), true).unwrap();
        assert_eq!(config.trials, 25);
        assert_eq!(config.seed, Some(7));
        assert!(config.parallel);

        let config = build_config(None, None, None, false).unwrap();
        assert_eq!(config, MonteCarloConfig::default());
    }

    #[test]
    fn test_build_config_rejects_zero_trials() {
        assert!(build_config(None, Some(0), None, false).is_err());
    }

    #[test]
    fn test_build_config_missing_file() {
        let path = PathBuf::from("/nonexistent/hex-config.json");
        let err = build_config(Some(&path), None, None, false).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_ask_next() {
        let input = shared_input(Cursor::new("maybe\nY\n"));
        assert_eq!(ask_next(&input).unwrap(), Next::Again);

        let input = shared_input(Cursor::new("n\n"));
        assert_eq!(ask_next(&input).unwrap(), Next::Quit);

        let input = shared_input(Cursor::new("c\n"));
        assert_eq!(ask_next(&input).unwrap(), Next::ChangePlayers);

        let input = shared_input(Cursor::new(""));
        assert_eq!(ask_next(&input).unwrap(), Next::Quit);
    }

    #[test]
    fn test_change_players_rebuilds_seats() {
        let input = shared_input(Cursor::new("c\nrobot\ncomputer\nrandom\n"));
        assert_eq!(ask_next(&input).unwrap(), Next::ChangePlayers);

        let (p1, p2) = select_kinds(&input).unwrap().unwrap();
        assert_eq!((p1, p2), (PlayerKind::Computer, PlayerKind::Random));

        let config = MonteCarloConfig::with_trials(5).with_seed(3);
        let mut board = HexBoard::new(3).unwrap();
        let mut seats = create_seats(p1, p2, 3, &config, &input).unwrap();
        assert!(!seats[0].is_interactive());
        assert!(!seats[1].is_interactive());

        let record = play_match(&mut board, &mut seats, false, Some(&*input)).unwrap().unwrap();
        assert!(record.winner == 1 || record.winner == 2);
    }

    #[test]
    fn test_select_kinds_end_of_input() {
        let input = shared_input(Cursor::new("human\n"));
        assert_eq!(select_kinds(&input).unwrap(), None);
    }

    #[test]
    fn test_human_end_of_input_ends_match() {
        let input = shared_input(Cursor::new("1 1\n"));
        let mut board = HexBoard::new(3).unwrap();
        let mut seats: [Box<dyn Player>; 2] = [
            Box::new(HumanPlayer::new("Player1", input.clone())),
            Scripted::boxed("Red", &[(0, 0)]),
        ];

        let result = play_match(&mut board, &mut seats, false, Some(&*input)).unwrap();
        assert_eq!(result, None);
        assert_eq!(board.free_vertices().len(), 7);
    }

    #[test]
    fn test_human_read_failure_is_an_error() {
        let input = shared_input(BufReader::new(Broken));
        let mut board = HexBoard::new(3).unwrap();
        let mut seats: [Box<dyn Player>; 2] = [
            Box::new(HumanPlayer::new("Player1", input.clone())),
            Scripted::boxed("Red", &[(0, 0)]),
        ];

        let err = play_match(&mut board, &mut seats, false, Some(&*input)).unwrap_err();
        assert!(err.to_string().contains("Failed to read move"));
        assert_eq!(board.free_vertices().len(), 9);
    }

    #[test]
    fn test_reset_replays_same_game() {
        let mut board = HexBoard::new(3).unwrap();
        let mut seats = [
            Scripted::boxed("Blue", &[(1, 1), (1, 0), (1, 2)]),
            Scripted::boxed("Red", &[(0, 0), (0, 2)]),
        ];
        let first = play_match(&mut board, &mut seats, false, None).unwrap().unwrap();

        board.reset_board();
        for seat in seats.iter_mut() {
            seat.reset(&board);
        }
        let second = play_match(&mut board, &mut seats, false, None).unwrap().unwrap();
        assert_eq!(first, second);
    }
}
