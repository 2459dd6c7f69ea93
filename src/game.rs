// 2048 board mechanics: sliding, merging, spawning
//
// The board is a flat row-major array of 16 tile values plus the running
// score. States are small Copy values; every operation returns a fresh state
// and leaves the receiver untouched.

use std::fmt;

use rand::Rng;

use crate::types::{Coord, GameState, Move, Spawn};

/// Side length of the board
pub const BOARD_SIZE: usize = 4;

/// Probability that a spawned tile is a 2 (a 4 otherwise)
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A 4x4 2048 position with its running score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game2048 {
    cells: [u32; CELL_COUNT],
    score: u32,
}

impl Game2048 {
    /// Creates an empty board with score zero
    pub fn new() -> Self {
        Game2048 {
            cells: [0; CELL_COUNT],
            score: 0,
        }
    }

    /// Builds a board from a row-major grid of tile values, score zero
    pub fn from_grid(grid: [[u32; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut cells = [0; CELL_COUNT];
        for (row, values) in grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                cells[Self::index(row, col)] = value;
            }
        }
        Game2048 { cells, score: 0 }
    }

    /// Returns the same board with the running score replaced
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    /// Coordinates of every empty cell in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut empty = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.tile(row, col) == 0 {
                    empty.push(Coord { row, col });
                }
            }
        }
        empty
    }

    /// Highest tile on the board, 0 when empty
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Places a random tile on an empty cell: 2 with probability 0.9, 4
    /// otherwise. Returns the board unchanged when no cell is free.
    pub fn spawn_random<R: Rng>(&self, rng: &mut R) -> Self {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return *self;
        }
        let at = empty[rng.random_range(0..empty.len())];
        let value = if rng.random_bool(SPAWN_TWO_PROBABILITY) { 2 } else { 4 };
        self.with_tile(at, value)
    }

    fn index(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    /// Cell indices of one lane in traversal order: element 0 is the edge the
    /// tiles slide toward
    fn lane_indices(mv: Move, lane: usize) -> [usize; BOARD_SIZE] {
        let mut indices = [0usize; BOARD_SIZE];
        for (step, slot) in indices.iter_mut().enumerate() {
            *slot = match mv {
                Move::Left => Self::index(lane, step),
                Move::Right => Self::index(lane, BOARD_SIZE - 1 - step),
                Move::Up => Self::index(step, lane),
                Move::Down => Self::index(BOARD_SIZE - 1 - step, lane),
            };
        }
        indices
    }

    fn slide(&self, mv: Move) -> Self {
        let mut next = *self;
        for lane in 0..BOARD_SIZE {
            let indices = Self::lane_indices(mv, lane);
            let mut line = [0u32; BOARD_SIZE];
            for (slot, &i) in line.iter_mut().zip(indices.iter()) {
                *slot = self.cells[i];
            }
            let (merged, gained) = slide_line(line);
            for (&i, &value) in indices.iter().zip(merged.iter()) {
                next.cells[i] = value;
            }
            next.score += gained;
        }
        next
    }
}

/// Compacts one lane toward index 0, merging equal neighbours once per pair.
/// Returns the new lane and the points gained from merges.
fn slide_line(line: [u32; BOARD_SIZE]) -> ([u32; BOARD_SIZE], u32) {
    let mut packed = [0u32; BOARD_SIZE];
    let mut len = 0;
    for &value in &line {
        if value != 0 {
            packed[len] = value;
            len += 1;
        }
    }

    let mut out = [0u32; BOARD_SIZE];
    let mut gained = 0;
    let mut write = 0;
    let mut read = 0;
    while read < len {
        if read + 1 < len && packed[read] == packed[read + 1] {
            let merged = packed[read] * 2;
            out[write] = merged;
            gained += merged;
            read += 2;
        } else {
            out[write] = packed[read];
            read += 1;
        }
        write += 1;
    }
    (out, gained)
}

impl GameState for Game2048 {
    fn legal_moves(&self) -> Vec<Move> {
        Move::all()
            .iter()
            .copied()
            .filter(|&mv| self.slide(mv).cells != self.cells)
            .collect()
    }

    fn apply_move(&self, mv: Move) -> Self {
        self.slide(mv)
    }

    fn possible_spawns(&self) -> Vec<Spawn> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return Vec::new();
        }
        let per_cell = 1.0 / empty.len() as f64;
        let mut spawns = Vec::with_capacity(empty.len() * 2);
        for at in empty {
            spawns.push(Spawn {
                at,
                value: 2,
                probability: SPAWN_TWO_PROBABILITY * per_cell,
            });
            spawns.push(Spawn {
                at,
                value: 4,
                probability: (1.0 - SPAWN_TWO_PROBABILITY) * per_cell,
            });
        }
        spawns
    }

    fn with_tile(&self, at: Coord, value: u32) -> Self {
        let mut next = *self;
        next.cells[Self::index(at.row, at.col)] = value;
        next
    }

    fn game_over(&self) -> bool {
        self.legal_moves().is_empty()
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn tile(&self, row: usize, col: usize) -> u32 {
        self.cells[Self::index(row, col)]
    }
}

impl Default for Game2048 {
    fn default() -> Self {
        Game2048::new()
    }
}

impl fmt::Display for Game2048 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let value = self.tile(row, col);
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "score: {}", self.score)
    }
}
