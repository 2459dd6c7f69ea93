// Core board and move types shared by the game, the search, and the evaluator

use std::fmt;

/// Represents the four slide directions available to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Directions in the order ties are broken: when two moves search to the
    /// same value, the one earlier in this list wins
    pub const PRIORITY: [Move; 4] = [Move::Left, Move::Up, Move::Right, Move::Down];

    /// Returns all possible moves
    pub fn all() -> [Move; 4] {
        [Move::Up, Move::Down, Move::Left, Move::Right]
    }

    /// Converts the move to a lowercase string for logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 2D cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

/// One tile placement the environment could make, with its probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub at: Coord,
    pub value: u32,
    pub probability: f64,
}

/// Board-state contract the search and evaluator operate through.
///
/// Everything the agent knows about the game goes through these methods, so
/// the board representation stays swappable: the packed grid in `game`, or a
/// scripted state in tests. Implementations are immutable values; applying a
/// move or a spawn yields a fresh state.
pub trait GameState {
    /// Moves that would change the board. Empty exactly when the game is over.
    fn legal_moves(&self) -> Vec<Move>;

    /// State after sliding in the given direction, merge points added to the
    /// running score. The spawn that follows a real move is modeled
    /// separately through `possible_spawns`.
    fn apply_move(&self, mv: Move) -> Self
    where
        Self: Sized;

    /// Every tile placement the environment could make next. Probabilities
    /// across the returned list sum to 1 unless the board is full, in which
    /// case the list is empty.
    fn possible_spawns(&self) -> Vec<Spawn>;

    /// State with one tile placed on an empty cell, score unchanged.
    fn with_tile(&self, at: Coord, value: u32) -> Self
    where
        Self: Sized;

    /// True when no legal move remains.
    fn game_over(&self) -> bool;

    /// Points accumulated through merges so far.
    fn score(&self) -> u32;

    /// Value of the tile at the given cell, 0 for empty.
    fn tile(&self, row: usize, col: usize) -> u32;
}
