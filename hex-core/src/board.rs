//! Hex board as a colored graph
//!
//! A board of playable dimension N is stored as an (N+2)x(N+2) grid of graph
//! vertices. The extra ring holds the walls: the top and bottom rows are Red,
//! the left and right columns are Blue, and the four corners are Gray. A
//! player wins when a path of their color joins their two walls, so victory
//! is a plain reachability search between two margin vertices.
//!
//! The hexagonal topology is embedded in the square grid by linking every
//! cell to its right neighbor, the cell below it, and the cell below-left:
//!
//! ```text
//!   X - X - X
//!    \ / \ / \
//!     X - X - X
//! ```

use std::fmt;

use crate::color::{Color, Outcome};
use crate::error::HexError;
use crate::graph::{Graph, VertId};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest playable dimension
pub const MIN_DIM: usize = 3;

/// Placeholder weight for every board edge
const EDGE_WEIGHT: i32 = 1;

// ============================================================================
// COORDINATE TRANSFORM
// ============================================================================

/// Maps a (row, col) pair onto a vertex index of a square grid, with an
/// optional offset
#[derive(Clone, Copy, Debug)]
struct Transpose {
    row_off: usize,
    col_off: usize,
    dim: usize,
}

impl Transpose {
    fn new(row_off: usize, col_off: usize, dim: usize) -> Self {
        Self { row_off, col_off, dim }
    }

    fn index(&self, row: usize, col: usize) -> VertId {
        let i = (row + self.row_off) * self.dim + (col + self.col_off);
        debug_assert!(i < self.dim * self.dim, "({}, {}) outside grid", row, col);
        i
    }
}

// ============================================================================
// HEX BOARD
// ============================================================================

/// Hex board with margin walls and alternating turns
#[derive(Clone, Debug)]
pub struct HexBoard {
    graph: Graph<Color, i32>,
    /// Dimension including margins
    abs_dim: usize,
    /// Playable dimension
    rel_dim: usize,
    /// Margin-inclusive coordinates
    abs_pos: Transpose,
    /// Playable coordinates, offset by one row and column
    rel_pos: Transpose,
    p1_turn: bool,
}

impl HexBoard {
    /// Create an empty board with an N x N playable area
    pub fn new(dim: usize) -> Result<Self, HexError> {
        if dim < MIN_DIM {
            return Err(HexError::InvalidDimension { dim, min: MIN_DIM });
        }

        let abs_dim = dim + 2;
        let mut board = Self {
            graph: Graph::with_capacity(abs_dim * abs_dim),
            abs_dim,
            rel_dim: dim,
            abs_pos: Transpose::new(0, 0, abs_dim),
            rel_pos: Transpose::new(1, 1, abs_dim),
            p1_turn: true,
        };
        board.reset_board();
        Ok(board)
    }

    /// Rebuild every vertex and edge, ready for a new game
    pub fn reset_board(&mut self) {
        self.graph.clear();

        let last = self.abs_dim - 1;
        for row in 0..self.abs_dim {
            for col in 0..self.abs_dim {
                let on_row_margin = row == 0 || row == last;
                let on_col_margin = col == 0 || col == last;
                let color = match (on_row_margin, on_col_margin) {
                    (true, true) => Color::Gray,
                    (true, false) => Color::Red,
                    (false, true) => Color::Blue,
                    (false, false) => Color::White,
                };
                self.graph.add_vertex(color);
            }
        }

        for row in 0..self.abs_dim {
            for col in 0..self.abs_dim {
                let here = self.abs_pos.index(row, col);

                if col < last {
                    self.graph.add_edge(here, self.abs_pos.index(row, col + 1), EDGE_WEIGHT);
                }
                if row < last {
                    self.graph.add_edge(here, self.abs_pos.index(row + 1, col), EDGE_WEIGHT);
                }
                if col > 0 && row < last {
                    self.graph.add_edge(here, self.abs_pos.index(row + 1, col - 1), EDGE_WEIGHT);
                }
            }

            // Last-column closure; add_edge dedups it against the vertical link
            if row < last {
                self.graph.add_edge(
                    self.abs_pos.index(row, last),
                    self.abs_pos.index(row + 1, last),
                    EDGE_WEIGHT,
                );
            }
        }

        self.p1_turn = true;

        tracing::debug!(
            "Reset {}x{} board: {} vertices, {} edges",
            self.rel_dim,
            self.rel_dim,
            self.graph.node_count(),
            self.graph.edge_count()
        );
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Player to move: 1 or 2
    pub fn current_player(&self) -> u8 {
        if self.p1_turn {
            1
        } else {
            2
        }
    }

    /// Color of the player to move
    pub fn current_color(&self) -> Color {
        if self.p1_turn {
            Color::Blue
        } else {
            Color::Red
        }
    }

    /// Dimension of the playable area
    pub fn playable_dim(&self) -> usize {
        self.rel_dim
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Underlying graph (read-only)
    pub fn graph(&self) -> &Graph<Color, i32> {
        &self.graph
    }

    pub fn vertex_key(&self, v: VertId) -> Color {
        self.graph.vertex_key(v)
    }

    /// Overwrite one vertex label. Bypasses move rules; meant for scratch
    /// boards used in simulation.
    pub fn set_vertex_key(&mut self, v: VertId, color: Color) {
        self.graph.set_vertex_key(v, color);
    }

    /// All vertex labels in index order
    pub fn labels(&self) -> Vec<Color> {
        (0..self.graph.node_count())
            .map(|v| self.graph.vertex_key(v))
            .collect()
    }

    /// Vertex index of a playable cell
    pub fn relative_index(&self, row: usize, col: usize) -> VertId {
        assert!(
            row < self.rel_dim && col < self.rel_dim,
            "({}, {}) outside {}x{} board",
            row,
            col,
            self.rel_dim,
            self.rel_dim
        );
        self.rel_pos.index(row, col)
    }

    /// Color of a playable cell, or None when out of bounds
    pub fn color_at(&self, row: i32, col: i32) -> Option<Color> {
        self.checked_index(row, col).map(|v| self.graph.vertex_key(v))
    }

    fn checked_index(&self, row: i32, col: i32) -> Option<VertId> {
        let dim = self.rel_dim as i32;
        if row < 0 || col < 0 || row >= dim || col >= dim {
            return None;
        }
        Some(self.rel_pos.index(row as usize, col as usize))
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Place a stone for the current player at a playable cell
    ///
    /// Rejected moves (`OutOfBounds`, `Occupied`) change nothing. A winning
    /// move leaves the turn with the winner; the board is then terminal
    /// until `reset_board`.
    pub fn play(&mut self, row: i32, col: i32) -> Outcome {
        let v = match self.checked_index(row, col) {
            Some(v) => v,
            None => return Outcome::OutOfBounds,
        };

        if self.graph.vertex_key(v) != Color::White {
            return Outcome::Occupied;
        }

        let color = self.current_color();
        self.graph.set_vertex_key(v, color);
        tracing::trace!("Player {} plays ({}, {})", self.current_player(), row, col);

        if self.is_victory(color) {
            return if self.p1_turn {
                Outcome::P1Win
            } else {
                Outcome::P2Win
            };
        }

        self.p1_turn = !self.p1_turn;
        Outcome::NoWin
    }

    /// Collect the vertex indices of all free playable cells, row-major
    pub fn get_free_vertices(&self, out: &mut Vec<VertId>) {
        out.clear();
        for row in 0..self.rel_dim {
            for col in 0..self.rel_dim {
                let v = self.rel_pos.index(row, col);
                if self.graph.vertex_key(v) == Color::White {
                    out.push(v);
                }
            }
        }
    }

    pub fn free_vertices(&self) -> Vec<VertId> {
        let mut out = Vec::with_capacity(self.rel_dim * self.rel_dim);
        self.get_free_vertices(&mut out);
        out
    }

    /// Playable (row, col) of a vertex index
    pub fn vertex_to_row_col(&self, v: VertId) -> (i32, i32) {
        let row = (v / self.abs_dim) as i32 - 1;
        let col = (v % self.abs_dim) as i32 - 1;
        (row, col)
    }

    /// Copy every vertex label from a board of the same dimension
    pub fn clone_board_state(&mut self, other: &HexBoard) {
        assert_eq!(
            self.graph.node_count(),
            other.graph.node_count(),
            "cannot copy state between boards of different size"
        );
        for v in 0..other.graph.node_count() {
            self.graph.set_vertex_key(v, other.graph.vertex_key(v));
        }
    }

    // ========================================================================
    // VICTORY
    // ========================================================================

    /// Margin vertices a winning path must join: (source, destination)
    fn wall_endpoints(&self, color: Color) -> (VertId, VertId) {
        let d = self.abs_dim;
        match color {
            Color::Blue => (self.abs_pos.index(1, 0), self.abs_pos.index(d - 2, d - 1)),
            Color::Red => (self.abs_pos.index(0, 1), self.abs_pos.index(d - 1, d - 2)),
            other => panic!("{:?} has no walls to connect", other),
        }
    }

    /// Check whether `color` has a path between its two walls
    ///
    /// Depth-first search from one wall vertex, expanding only vertices of
    /// `color`. Walls of the other color and the gray corners are never
    /// expanded, so they block the search.
    pub fn is_victory(&self, color: Color) -> bool {
        let (src, dst) = self.wall_endpoints(color);

        let mut visited = vec![false; self.graph.node_count()];
        let mut stack = vec![src];
        visited[src] = true;

        while let Some(top) = stack.pop() {
            for n in self.graph.neighbors(top) {
                if n == dst {
                    return true;
                }
                if !visited[n] {
                    visited[n] = true;
                    if self.graph.vertex_key(n) == color {
                        stack.push(n);
                    }
                }
            }
        }

        false
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl fmt::Display for HexBoard {
    /// Playable area with coordinates and links, each row shifted right
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dim = self.rel_dim;
        let pos = self.rel_pos;
        let mut indent = String::from(" ");

        write!(f, "  ")?;
        for col in 0..dim {
            write!(f, "{:>2}  ", col)?;
        }
        writeln!(f)?;

        for row in 0..dim {
            write!(f, "{}{:>2} ", &indent[1..], row)?;
            for col in 0..dim {
                write!(f, "{}", self.graph.vertex_key(pos.index(row, col)))?;
                if col + 1 < dim {
                    let linked = self.graph.is_adjacent(pos.index(row, col), pos.index(row, col + 1));
                    f.write_str(if linked { " - " } else { "   " })?;
                }
            }
            writeln!(f)?;

            if row + 1 < dim {
                write!(f, "{}   ", indent)?;
                for col in 0..dim {
                    let here = pos.index(row, col);
                    if col > 0 {
                        let linked = self.graph.is_adjacent(here, pos.index(row + 1, col - 1));
                        f.write_str(if linked { "/ " } else { "  " })?;
                    }
                    let linked = self.graph.is_adjacent(here, pos.index(row + 1, col));
                    f.write_str(if linked { "\\ " } else { "  " })?;
                }
                writeln!(f)?;
            }
            indent.push_str("  ");
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn board(dim: usize) -> HexBoard {
        HexBoard::new(dim).unwrap()
    }

    /// Labels of the margin ring, in absolute index order
    fn margin_labels(b: &HexBoard) -> Vec<(VertId, Color)> {
        let d = b.abs_dim;
        (0..b.node_count())
            .filter(|&v| {
                let (r, c) = (v / d, v % d);
                r == 0 || c == 0 || r == d - 1 || c == d - 1
            })
            .map(|v| (v, b.vertex_key(v)))
            .collect()
    }

    #[test]
    fn test_rejects_small_dimension() {
        assert_eq!(
            HexBoard::new(2).unwrap_err(),
            HexError::InvalidDimension { dim: 2, min: 3 }
        );
    }

    #[test]
    fn test_layout() {
        let b = board(3);
        assert_eq!(b.node_count(), 25);
        // corners
        for v in [0, 4, 20, 24] {
            assert_eq!(b.vertex_key(v), Color::Gray);
        }
        // walls
        for c in 1..4 {
            assert_eq!(b.vertex_key(c), Color::Red);
            assert_eq!(b.vertex_key(20 + c), Color::Red);
            assert_eq!(b.vertex_key(c * 5), Color::Blue);
            assert_eq!(b.vertex_key(c * 5 + 4), Color::Blue);
        }
        assert_eq!(b.free_vertices().len(), 9);
        assert_eq!(b.current_player(), 1);
    }

    #[test]
    fn test_edge_count() {
        // horizontal + vertical + one diagonal per cell not in row 0 / col 0
        let b = board(3);
        let d = 5;
        assert_eq!(b.graph().edge_count(), 2 * d * (d - 1) + (d - 1) * (d - 1));
    }

    #[test]
    fn test_hex_neighbors() {
        let b = board(5);
        let center = b.relative_index(2, 2);
        let mut n = Vec::new();
        b.graph().get_neighbors(center, &mut n);
        n.sort_unstable();

        let mut expected = vec![
            b.relative_index(1, 2),
            b.relative_index(1, 3),
            b.relative_index(2, 1),
            b.relative_index(2, 3),
            b.relative_index(3, 1),
            b.relative_index(3, 2),
        ];
        expected.sort_unstable();
        assert_eq!(n, expected);
    }

    #[test]
    fn test_adjacency_symmetric() {
        let b = board(4);
        let g = b.graph();
        for x in 0..g.node_count() {
            for y in 0..g.node_count() {
                assert_eq!(g.is_adjacent(x, y), g.is_adjacent(y, x));
            }
            assert!(!g.is_adjacent(x, x));
        }
    }

    #[test]
    fn test_scenario_row_win() {
        let mut b = board(3);
        assert_eq!(b.play(1, 1), Outcome::NoWin);
        assert_eq!(b.play(0, 0), Outcome::NoWin);
        assert_eq!(b.play(1, 0), Outcome::NoWin);
        assert_eq!(b.play(0, 2), Outcome::NoWin);
        assert_eq!(b.play(1, 2), Outcome::P1Win);
        // winner keeps the turn
        assert_eq!(b.current_player(), 1);
    }

    #[test]
    fn test_red_column_win() {
        let mut b = board(3);
        assert_eq!(b.play(0, 0), Outcome::NoWin);
        assert_eq!(b.play(0, 1), Outcome::NoWin);
        assert_eq!(b.play(1, 0), Outcome::NoWin);
        assert_eq!(b.play(1, 1), Outcome::NoWin);
        assert_eq!(b.play(2, 2), Outcome::NoWin);
        assert_eq!(b.play(2, 1), Outcome::P2Win);
        assert_eq!(b.current_player(), 2);
    }

    #[test]
    fn test_occupied_changes_nothing() {
        let mut b = board(4);
        b.play(2, 2);
        let before = b.labels();
        assert_eq!(b.play(2, 2), Outcome::Occupied);
        assert_eq!(b.labels(), before);
        assert_eq!(b.current_player(), 2);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut b = board(4);
        let before = b.labels();
        assert_eq!(b.play(-1, 0), Outcome::OutOfBounds);
        assert_eq!(b.play(4, 0), Outcome::OutOfBounds);
        assert_eq!(b.play(0, 4), Outcome::OutOfBounds);
        assert_eq!(b.play(0, -1), Outcome::OutOfBounds);
        assert_eq!(b.labels(), before);
        assert_eq!(b.current_player(), 1);
    }

    #[test]
    fn test_turn_alternation() {
        let mut b = board(5);
        let moves = [(0, 0), (4, 4), (0, 4), (4, 0), (2, 2), (1, 3)];
        let mut expected = 1;
        for (r, c) in moves {
            assert_eq!(b.current_player(), expected);
            assert_eq!(b.play(r, c), Outcome::NoWin);
            expected = 3 - expected;
        }
        assert_eq!(b.current_player(), expected);
    }

    #[test]
    fn test_margins_survive_full_game() {
        let mut b = board(4);
        let margins = margin_labels(&b);
        'game: for row in 0..4 {
            for col in 0..4 {
                if b.play(row, col).is_win() {
                    break 'game;
                }
            }
        }
        assert_eq!(margin_labels(&b), margins);
    }

    #[test]
    fn test_victory_asymmetry() {
        let mut b = board(4);
        for v in b.free_vertices() {
            b.set_vertex_key(v, Color::Blue);
        }
        // only the red walls are left red
        assert!(b.is_victory(Color::Blue));
        assert!(!b.is_victory(Color::Red));

        for row in 0..4 {
            for col in 0..4 {
                let v = b.relative_index(row, col);
                b.set_vertex_key(v, Color::Red);
            }
        }
        assert!(b.is_victory(Color::Red));
        assert!(!b.is_victory(Color::Blue));
    }

    #[test]
    fn test_blue_needs_left_to_right() {
        // a full blue column joins the red walls, not the blue ones
        let mut b = board(3);
        for row in 0..3 {
            let v = b.relative_index(row, 1);
            b.set_vertex_key(v, Color::Blue);
        }
        assert!(!b.is_victory(Color::Blue));
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let b = board(3);
        assert!(!b.is_victory(Color::Blue));
        assert!(!b.is_victory(Color::Red));
    }

    #[test]
    #[should_panic(expected = "no walls")]
    fn test_victory_for_white_panics() {
        board(3).is_victory(Color::White);
    }

    #[test]
    fn test_free_vertices_row_major_and_inverse() {
        let mut b = board(4);
        b.play(0, 1);
        b.play(3, 2);
        let free = b.free_vertices();
        assert_eq!(free.len(), 14);
        assert!(free.windows(2).all(|w| w[0] < w[1]));
        for v in free {
            let (r, c) = b.vertex_to_row_col(v);
            assert_eq!(b.relative_index(r as usize, c as usize), v);
            assert_eq!(b.color_at(r, c), Some(Color::White));
        }
    }

    #[test]
    fn test_clone_board_state() {
        let mut a = board(3);
        a.play(1, 1);
        a.play(0, 2);
        let mut b = board(3);
        b.clone_board_state(&a);
        assert_eq!(a.labels(), b.labels());
        // turn state is not copied
        assert_eq!(b.current_player(), 1);
    }

    #[test]
    #[should_panic(expected = "different size")]
    fn test_clone_board_state_size_mismatch() {
        let a = board(3);
        let mut b = board(4);
        b.clone_board_state(&a);
    }

    #[test]
    fn test_reset_restores_empty_board() {
        let fresh = board(3);
        let mut b = board(3);
        b.play(0, 0);
        b.play(2, 2);
        b.reset_board();
        assert_eq!(b.labels(), fresh.labels());
        assert_eq!(b.graph().edge_count(), fresh.graph().edge_count());
        assert_eq!(b.current_player(), 1);
    }

    #[test]
    fn test_render() {
        let mut b = board(3);
        b.play(0, 0);
        b.play(1, 1);
        let text = b.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   0   1   2  ");
        assert_eq!(lines[1], " 0 X - . - .");
        assert!(lines[2].trim_start().starts_with("\\ / \\ / \\"));
        assert_eq!(lines[3].trim_start(), "1 . - O - .");
        assert_eq!(lines.len(), 6);
    }
}
