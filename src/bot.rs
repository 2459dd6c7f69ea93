// Decision engine: iterative deepening expectimax under a wall-clock budget
//
// The bot owns the configuration, the lifetime statistics, and the slot the
// chosen move is registered in. Each decision restarts the search at the
// configured initial depth and keeps deepening until the clock says stop.
// Only fully completed depth iterations may update the registered move, so
// the answer is always the best result of the deepest finished search.

use std::time::Duration;

use log::{debug, info};

use crate::config::Config;
use crate::search::{prioritized_moves, MoveClock, Searcher, TimeSource};
use crate::stats::SearchStats;
use crate::types::{GameState, Move};

pub struct Bot {
    config: Config,
    stats: SearchStats,
    chosen: Option<Move>,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            stats: SearchStats::default(),
            chosen: None,
        }
    }

    /// The move registered by the decision in progress, or by the last one
    pub fn chosen_move(&self) -> Option<Move> {
        self.chosen
    }

    /// Counters accumulated over the agent's lifetime
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Picks a move for the given position within the configured time budget
    ///
    /// The first legal move in preference order is registered immediately, so
    /// there is a defined answer from the first instant even if the budget
    /// expires before depth 1 finishes. Returns `None` only when the position
    /// has no legal move at all.
    ///
    /// # Arguments
    /// * `state` - Position to decide on
    ///
    /// # Returns
    /// * `Option<Move>` - The registered move, `None` on a dead position
    pub fn find_move<S: GameState>(&mut self, state: &S) -> Option<Move> {
        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let clock = MoveClock::start(budget);
        self.find_move_with_clock(state, &clock)
    }

    /// Same as `find_move`, with the caller supplying the time source
    pub fn find_move_with_clock<S, T>(&mut self, state: &S, clock: &T) -> Option<Move>
    where
        S: GameState,
        T: TimeSource,
    {
        self.chosen = None;

        let moves = prioritized_moves(state);
        if moves.is_empty() {
            info!("No legal moves available");
            return None;
        }
        self.stats.record_decision();

        // a defined answer from the first instant
        self.set_move(moves[0]);

        let mut completed = 0;
        let mut depth = self.config.timing.initial_depth.max(1);
        while clock.time_remaining() {
            match self.search_depth(state, &moves, depth, clock) {
                Some((best, value)) => {
                    self.set_move(best);
                    self.stats.record_completed_depth();
                    completed = depth;
                    debug!("Depth {} complete: {} ({:.1})", depth, best, value);
                }
                None => {
                    debug!("Budget elapsed inside depth {}, keeping previous answer", depth);
                    break;
                }
            }
            depth += 1;
        }

        if let Some(best) = self.chosen {
            debug!("Chose {} ({} depths completed)", best, completed);
        }
        self.chosen
    }

    /// Runs one full-width iteration at the given depth over the root moves.
    /// `None` means the deadline fired partway through and nothing from this
    /// iteration may be committed.
    fn search_depth<S, T>(
        &mut self,
        state: &S,
        moves: &[Move],
        depth: u32,
        clock: &T,
    ) -> Option<(Move, f64)>
    where
        S: GameState,
        T: TimeSource,
    {
        self.stats.record_root();
        let mut searcher = Searcher::new(&self.config.heuristic, clock, &mut self.stats);

        let mut best: Option<(Move, f64)> = None;
        for &mv in moves {
            if !clock.time_remaining() {
                return None;
            }
            let value = searcher.chance_value(&state.apply_move(mv), depth - 1)?;
            if best.map_or(true, |(_, so_far)| value > so_far) {
                best = Some((mv, value));
            }
        }
        best
    }

    fn set_move(&mut self, mv: Move) {
        self.chosen = Some(mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game2048;

    struct ExpiredClock;

    impl TimeSource for ExpiredClock {
        fn time_remaining(&self) -> bool {
            false
        }
    }

    #[test]
    fn dead_position_yields_no_move() {
        let mut bot = Bot::new(Config::default_hardcoded());
        let stuck = Game2048::from_grid([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert_eq!(bot.find_move(&stuck), None);
        assert_eq!(bot.chosen_move(), None);
        assert_eq!(bot.stats().decisions(), 0);
    }

    #[test]
    fn expired_budget_still_answers_with_the_default() {
        let mut bot = Bot::new(Config::default_hardcoded());
        let board = Game2048::from_grid([
            [0, 2, 0, 0],
            [0, 0, 0, 0],
            [0, 2, 0, 0],
            [0, 0, 0, 0],
        ]);
        // every direction is open, so the default is the top preference
        let mv = bot.find_move_with_clock(&board, &ExpiredClock);
        assert_eq!(mv, Some(Move::Left));
        assert_eq!(bot.stats().depths_completed(), 0);
    }
}
