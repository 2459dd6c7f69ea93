//! Time Budget Tests
//!
//! The budget is the only thing that stops the search, so these scenarios
//! check what happens as it grows and what happens when it is gone before
//! the first depth. The deterministic countdown source stands in for the
//! wall clock; one permission check is the unit of time.

use std::cell::Cell;
use std::time::Duration;

use expectimax_2048::bot::Bot;
use expectimax_2048::config::Config;
use expectimax_2048::game::Game2048;
use expectimax_2048::heuristic;
use expectimax_2048::search::{MoveClock, Searcher, TimeSource};
use expectimax_2048::stats::SearchStats;
use expectimax_2048::types::{Coord, GameState, Move};

struct CountdownClock {
    checks_left: Cell<u64>,
}

impl CountdownClock {
    fn new(checks: u64) -> Self {
        CountdownClock {
            checks_left: Cell::new(checks),
        }
    }
}

impl TimeSource for CountdownClock {
    fn time_remaining(&self) -> bool {
        let left = self.checks_left.get();
        if left == 0 {
            return false;
        }
        self.checks_left.set(left - 1);
        true
    }
}

fn midgame_board() -> Game2048 {
    Game2048::from_grid([
        [2, 4, 8, 16],
        [0, 2, 4, 8],
        [0, 0, 2, 4],
        [0, 0, 0, 2],
    ])
}

#[test]
fn test_completed_depth_grows_with_the_budget() {
    let budgets = [0u64, 3, 30, 300, 3_000, 30_000];
    let mut completed = Vec::new();

    for &budget in &budgets {
        let mut bot = Bot::new(Config::default_hardcoded());
        let clock = CountdownClock::new(budget);
        let chosen = bot.find_move_with_clock(&midgame_board(), &clock);

        assert!(chosen.is_some(), "a live position must yield a move");
        assert!(
            midgame_board().legal_moves().contains(&chosen.unwrap()),
            "budget {} produced an illegal move",
            budget
        );
        completed.push(bot.stats().depths_completed());
    }

    for pair in completed.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "completed depth must never shrink as the budget grows: {:?}",
            completed
        );
    }
    assert_eq!(completed[0], 0, "zero budget completes no depth");
    assert!(
        *completed.last().unwrap() >= 2,
        "a generous budget should finish depth 2: {:?}",
        completed
    );
}

#[test]
fn test_chance_layer_weights_spawns_by_probability() {
    // One empty cell at the top-left corner, so the chance layer has exactly
    // two outcomes: a 2 at 0.9 and a 4 at 0.1.
    let board = Game2048::from_grid([
        [0, 2, 4, 8],
        [16, 32, 64, 128],
        [256, 512, 1024, 2048],
        [2, 4, 8, 16],
    ]);
    assert_eq!(board.empty_cells().len(), 1);

    let weights = Config::default_hardcoded().heuristic;
    let corner = Coord { row: 0, col: 0 };
    let with_two = heuristic::evaluate(&weights, &board.with_tile(corner, 2));
    let with_four = heuristic::evaluate(&weights, &board.with_tile(corner, 4));

    let mut stats = SearchStats::default();
    let clock = CountdownClock::new(1_000_000);
    let mut searcher = Searcher::new(&weights, &clock, &mut stats);
    let value = searcher
        .chance_value(&board, 1)
        .expect("a million checks is plenty for one ply");

    let expected = 0.9 * with_two + 0.1 * with_four;
    assert!(
        (value - expected).abs() < 1e-9,
        "chance value {} should equal the weighted spawn average {}",
        value,
        expected
    );
}

#[test]
fn test_expired_wall_clock_still_returns_the_default() {
    let clock = MoveClock::start(Duration::from_millis(0));
    let mut bot = Bot::new(Config::default_hardcoded());
    let chosen = bot.find_move_with_clock(&midgame_board(), &clock);

    // left is legal here and first in the preference order
    assert_eq!(chosen, Some(Move::Left));
    assert_eq!(bot.stats().depths_completed(), 0);
}

#[test]
fn test_zero_configured_budget_answers_immediately() {
    let mut config = Config::default_hardcoded();
    config.timing.move_time_budget_ms = 0;
    config.timing.safety_margin_ms = 0;

    let mut bot = Bot::new(config);
    let chosen = bot.find_move(&midgame_board());
    assert_eq!(chosen, Some(Move::Left));
}
