// Expectimax over the GameState contract
//
// Two mutually recursive layers: max nodes pick the best value among player
// moves, chance nodes average child values weighted by spawn probability.
// Depth counts plies; the evaluator runs at depth zero and at dead ends.
//
// Every child expansion first asks the clock for permission. Once the budget
// runs out the whole call chain unwinds with None, so callers can tell a
// finished computation from an abandoned one. Overshoot past the deadline is
// bounded by one state transition plus one leaf evaluation.

use std::time::{Duration, Instant};

use crate::config::HeuristicConfig;
use crate::heuristic;
use crate::stats::SearchStats;
use crate::types::{GameState, Move};

/// Answers whether the current decision may keep computing
pub trait TimeSource {
    fn time_remaining(&self) -> bool;
}

/// Wall-clock time source fixed at the start of one decision
pub struct MoveClock {
    start: Instant,
    budget: Duration,
}

impl MoveClock {
    /// Starts the clock for one decision with the given budget
    pub fn start(budget: Duration) -> Self {
        MoveClock {
            start: Instant::now(),
            budget,
        }
    }
}

impl TimeSource for MoveClock {
    fn time_remaining(&self) -> bool {
        self.start.elapsed() < self.budget
    }
}

/// Legal moves reordered by the fixed preference list, so earlier entries win
/// value ties
pub fn prioritized_moves<S: GameState>(state: &S) -> Vec<Move> {
    let legal = state.legal_moves();
    Move::PRIORITY
        .iter()
        .copied()
        .filter(|mv| legal.contains(mv))
        .collect()
}

/// One in-flight expectimax computation, borrowing the weights, the clock,
/// and the counters for its duration
pub struct Searcher<'a, T: TimeSource> {
    weights: &'a HeuristicConfig,
    clock: &'a T,
    stats: &'a mut SearchStats,
}

impl<'a, T: TimeSource> Searcher<'a, T> {
    pub fn new(weights: &'a HeuristicConfig, clock: &'a T, stats: &'a mut SearchStats) -> Self {
        Searcher {
            weights,
            clock,
            stats,
        }
    }

    /// Value of a position with the player to act. None means the deadline
    /// fired and the partial result must be discarded.
    pub fn max_value<S: GameState>(&mut self, state: &S, depth: u32) -> Option<f64> {
        self.stats.record_node();
        if depth == 0 || state.game_over() {
            return Some(heuristic::evaluate(self.weights, state));
        }
        let moves = prioritized_moves(state);
        if moves.is_empty() {
            return Some(heuristic::evaluate(self.weights, state));
        }

        self.stats.record_parent();
        let mut best = f64::NEG_INFINITY;
        for mv in moves {
            if !self.clock.time_remaining() {
                return None;
            }
            let value = self.chance_value(&state.apply_move(mv), depth - 1)?;
            if value > best {
                best = value;
            }
        }
        Some(best)
    }

    /// Expected value of a position awaiting a spawn: every possible
    /// placement is expanded and weighted by its probability.
    pub fn chance_value<S: GameState>(&mut self, state: &S, depth: u32) -> Option<f64> {
        self.stats.record_node();
        if depth == 0 || state.game_over() {
            return Some(heuristic::evaluate(self.weights, state));
        }
        let spawns = state.possible_spawns();
        if spawns.is_empty() {
            return Some(heuristic::evaluate(self.weights, state));
        }

        self.stats.record_parent();
        let mut expected = 0.0;
        for spawn in spawns {
            if !self.clock.time_remaining() {
                return None;
            }
            let value = self.max_value(&state.with_tile(spawn.at, spawn.value), depth - 1)?;
            expected += spawn.probability * value;
        }
        Some(expected)
    }
}
