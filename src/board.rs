//! 2048 grid representation and move execution.
//!
//! This module provides the core game logic:
//! - [`merge_line`], the slide-and-merge rule for a single line
//! - [`Board`], a copyable 4x4 grid value with pure slide/legality queries
//! - [`Game`], the live state (grid, score, random source) that moves mutate
//!
//! Every direction is reduced to a left slide over a mirrored and/or
//! transposed view of the grid, then mapped back.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    CELLS, INITIAL_TILES, SIZE, SPAWN_HIGH, SPAWN_LOW, SPAWN_LOW_ODDS, SPAWN_ODDS_DENOM,
};
use crate::display::Snapshot;

/// Value held by a cell. `0` is empty, anything else is a power of two.
pub type Tile = u32;

/// Accumulated merge score.
pub type Score = u32;

/// One row or column, read in the direction tiles slide towards.
pub type Line = [Tile; SIZE];

/// Row-major grid of tiles.
pub type Grid = [[Tile; SIZE]; SIZE];

/// Errors raised when decoding a direction from outside input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid direction index {0} (expected 0..=3)")]
    InvalidDirection(u8),
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),
}

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in evaluation order. Ties in move selection go to the earliest.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Down),
            2 => Ok(Direction::Left),
            3 => Ok(Direction::Right),
            other => Err(BoardError::InvalidDirection(other)),
        }
    }
}

impl FromStr for Direction {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| s.eq_ignore_ascii_case(d.name()))
            .ok_or_else(|| BoardError::UnknownDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slide a line towards index 0 and merge equal neighbours.
///
/// Non-zero tiles are packed to the front, then a single left-to-right pass
/// doubles the left tile of each equal pair and zeroes the right one. Since the
/// consumed tile becomes `0`, it cannot take part in a second merge, so each
/// tile merges at most once per move. The result is packed again.
///
/// Returns the new line and the score gained (sum of merged values).
pub fn merge_line(line: Line) -> (Line, Score) {
    let mut packed = compact(line);
    let mut gained = 0;
    for i in 0..SIZE - 1 {
        if packed[i] != 0 && packed[i] == packed[i + 1] {
            packed[i] *= 2;
            gained += packed[i];
            packed[i + 1] = 0;
        }
    }
    (compact(packed), gained)
}

/// Move non-zero tiles to the front, preserving order, padding with zeros.
fn compact(line: Line) -> Line {
    let mut out = [0; SIZE];
    for (slot, tile) in out.iter_mut().zip(line.into_iter().filter(|&t| t != 0)) {
        *slot = tile;
    }
    out
}

/// A 4x4 grid of tiles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: Grid,
}

impl Board {
    /// A grid with every cell empty.
    pub const EMPTY: Board = Board { cells: [[0; SIZE]; SIZE] };

    pub fn from_rows(cells: Grid) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.cells[row][col]
    }

    /// Return the grid after sliding in `dir`, plus the score that slide earns.
    ///
    /// No tile is spawned.
    pub fn slide(self, dir: Direction) -> (Board, Score) {
        match dir {
            Direction::Left => self.slide_left(),
            Direction::Right => {
                let (b, s) = self.mirrored().slide_left();
                (b.mirrored(), s)
            }
            Direction::Up => {
                let (b, s) = self.transposed().slide_left();
                (b.transposed(), s)
            }
            Direction::Down => {
                let (b, s) = self.transposed().mirrored().slide_left();
                (b.mirrored().transposed(), s)
            }
        }
    }

    /// Like [`Board::slide`] but discards the score.
    #[inline]
    pub fn shift(self, dir: Direction) -> Board {
        self.slide(dir).0
    }

    /// True if sliding in `dir` would change any cell.
    ///
    /// Checks each line against its merged form; no grid copy is made.
    pub fn would_change(&self, dir: Direction) -> bool {
        (0..SIZE).any(|i| {
            let line = self.line(dir, i);
            merge_line(line).0 != line
        })
    }

    /// True if no direction changes the grid.
    pub fn is_terminal(&self) -> bool {
        !Direction::ALL.into_iter().any(|d| self.would_change(d))
    }

    /// Coordinates `(row, col)` of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(CELLS);
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &tile) in row.iter().enumerate() {
                if tile == 0 {
                    out.push((r, c));
                }
            }
        }
        out
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&t| t == 0).count()
    }

    /// Largest tile on the grid (0 when empty).
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
    ///
    /// Returns the cell filled, or `None` when the grid is full.
    pub fn spawn_tile(&mut self, rng: &mut fastrand::Rng) -> Option<(usize, usize)> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (r, c) = empty[rng.usize(..empty.len())];
        self.cells[r][c] = spawn_value(rng);
        Some((r, c))
    }

    fn slide_left(self) -> (Board, Score) {
        let mut out = Board::EMPTY;
        let mut score = 0;
        for (dst, &src) in out.cells.iter_mut().zip(self.cells.iter()) {
            let (merged, gained) = merge_line(src);
            *dst = merged;
            score += gained;
        }
        (out, score)
    }

    fn transposed(self) -> Board {
        let mut cells = self.cells;
        for r in 0..SIZE {
            for c in (r + 1)..SIZE {
                cells[r][c] = self.cells[c][r];
                cells[c][r] = self.cells[r][c];
            }
        }
        Board { cells }
    }

    fn mirrored(mut self) -> Board {
        for row in &mut self.cells {
            row.reverse();
        }
        self
    }

    /// Line `i` as seen when sliding in `dir` (index 0 is where tiles land).
    fn line(&self, dir: Direction, i: usize) -> Line {
        std::array::from_fn(|k| match dir {
            Direction::Left => self.cells[i][k],
            Direction::Right => self.cells[i][SIZE - 1 - k],
            Direction::Up => self.cells[k][i],
            Direction::Down => self.cells[SIZE - 1 - k][i],
        })
    }
}

fn spawn_value(rng: &mut fastrand::Rng) -> Tile {
    if rng.u8(0..SPAWN_ODDS_DENOM) < SPAWN_LOW_ODDS {
        SPAWN_LOW
    } else {
        SPAWN_HIGH
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &tile in row {
                if tile == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{tile:>5}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A game in progress: grid, score, and the random source used for spawns.
pub struct Game {
    board: Board,
    score: Score,
    rng: fastrand::Rng,
}

impl Game {
    /// Start a game on an empty grid with two spawned tiles.
    pub fn new(rng: fastrand::Rng) -> Self {
        let mut game = Game::from_parts(Board::EMPTY, 0, rng);
        for _ in 0..INITIAL_TILES {
            game.spawn_tile();
        }
        game
    }

    /// Resume from an explicit grid and score.
    pub fn from_parts(board: Board, score: Score, rng: fastrand::Rng) -> Self {
        Game { board, score, rng }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            score: self.score,
            grid: self.board.cells(),
        }
    }

    /// Spawn a tile on the live grid. No-op when the grid is full.
    pub fn spawn_tile(&mut self) -> Option<(usize, usize)> {
        self.board.spawn_tile(&mut self.rng)
    }

    /// Slide in `dir`. If the grid changed, add the merge score and spawn one tile.
    ///
    /// Returns whether the grid changed.
    pub fn play(&mut self, dir: Direction) -> bool {
        let (next, gained) = self.board.slide(dir);
        if next == self.board {
            return false;
        }
        self.board = next;
        self.score += gained;
        self.spawn_tile();
        true
    }

    /// True if `play(dir)` would change the grid. Does not touch the live state.
    pub fn can_move(&self, dir: Direction) -> bool {
        self.board.would_change(dir)
    }

    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }
}
