//! Keyboard player - reads moves as typed "row col" lines
//!
//! Level 4 - Input utilities

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use hex_core::{HexBoard, HexError, Player};

/// Line input shared between human players and the driver's prompts
pub type SharedInput = Rc<LineInput>;

/// Wrap a reader so several consumers can take turns reading lines from it
pub fn shared_input<R: BufRead + 'static>(reader: R) -> SharedInput {
    Rc::new(LineInput {
        reader: RefCell::new(Box::new(reader)),
        state: RefCell::new(InputState::Open),
    })
}

enum InputState {
    Open,
    Closed,
    Failed(io::Error),
}

/// Line reader that remembers when a player ran out of input
///
/// `Player::play` cannot return an error, so a human player records end of
/// input or a read failure here and the driver picks it up after the turn.
pub struct LineInput {
    reader: RefCell<Box<dyn BufRead>>,
    state: RefCell<InputState>,
}

impl LineInput {
    /// Read one trimmed line, or None at end of input
    pub fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let n = self.reader.borrow_mut().read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Whether a player hit end of input; a recorded read failure is
    /// returned as the error, once
    pub fn check_closed(&self) -> io::Result<bool> {
        let mut state = self.state.borrow_mut();
        match std::mem::replace(&mut *state, InputState::Closed) {
            InputState::Open => {
                *state = InputState::Open;
                Ok(false)
            }
            InputState::Closed => Ok(true),
            InputState::Failed(e) => Err(e),
        }
    }

    fn record(&self, state: InputState) {
        *self.state.borrow_mut() = state;
    }
}

/// Parse "row col" (whitespace or comma separated)
pub fn parse_move(line: &str) -> Result<(i32, i32), HexError> {
    let invalid = || HexError::InvalidMove(line.to_string());
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());

    let row = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    let col = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((row, col))
}

/// Human player typing coordinates
pub struct HumanPlayer {
    name: String,
    input: SharedInput,
}

impl HumanPlayer {
    pub fn new(name: impl Into<String>, input: SharedInput) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }

    /// Keep prompting until the line parses. Bounds and occupancy are left
    /// to the board.
    ///
    /// When input ends or fails the state is recorded on the shared input
    /// and an off-board move is returned.
    fn play(&mut self, _board: &HexBoard) -> (i32, i32) {
        loop {
            print!("\n{} enter move (row col): ", self.name);
            io::stdout().flush().ok();

            match self.input.read_line() {
                Ok(Some(line)) => match parse_move(&line) {
                    Ok(mv) => return mv,
                    Err(e) => println!("{}", e),
                },
                Ok(None) => {
                    self.input.record(InputState::Closed);
                    return (-1, -1);
                }
                Err(e) => {
                    self.input.record(InputState::Failed(e));
                    return (-1, -1);
                }
            }
        }
    }
}
