// Static board evaluation
//
// Scores a position as a weighted sum of structural features. The search
// calls this at its horizon, so the whole scale is relative: only the
// ordering between positions matters, and the weights in Agent.toml set
// how the features trade off against each other.

use crate::config::HeuristicConfig;
use crate::game::BOARD_SIZE;
use crate::types::GameState;

/// Scores a board for the player to move. Higher is better. Pure function of
/// the visible tiles, the running score, and the weights.
pub fn evaluate<S: GameState>(weights: &HeuristicConfig, state: &S) -> f64 {
    let grid = snapshot(state);

    let mut value = 0.0;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            value += f64::from(grid[row][col]) * weights.position_weights[row][col];
        }
    }
    value += f64::from(empty_count(&grid)) * weights.empty_weight;
    value += f64::from(monotone_lines(&grid)) * weights.monotonicity_weight;
    if corner_holds_max(&grid) {
        value += weights.corner_bonus;
    }
    value -= smoothness(&grid) * weights.smoothness_weight;
    value += f64::from(state.score()) * weights.score_weight;
    value
}

fn snapshot<S: GameState>(state: &S) -> [[u32; BOARD_SIZE]; BOARD_SIZE] {
    let mut grid = [[0; BOARD_SIZE]; BOARD_SIZE];
    for (row, line) in grid.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            *cell = state.tile(row, col);
        }
    }
    grid
}

fn empty_count(grid: &[[u32; BOARD_SIZE]; BOARD_SIZE]) -> u32 {
    grid.iter()
        .flatten()
        .filter(|&&value| value == 0)
        .count() as u32
}

/// Number of rows and columns whose values run entirely non-increasing or
/// entirely non-decreasing
fn monotone_lines(grid: &[[u32; BOARD_SIZE]; BOARD_SIZE]) -> u32 {
    let mut count = 0;
    for i in 0..BOARD_SIZE {
        let row = grid[i];
        let mut col = [0u32; BOARD_SIZE];
        for (j, cell) in col.iter_mut().enumerate() {
            *cell = grid[j][i];
        }
        if is_monotone(&row) {
            count += 1;
        }
        if is_monotone(&col) {
            count += 1;
        }
    }
    count
}

fn is_monotone(values: &[u32; BOARD_SIZE]) -> bool {
    let rising = values.windows(2).all(|pair| pair[0] <= pair[1]);
    let falling = values.windows(2).all(|pair| pair[0] >= pair[1]);
    rising || falling
}

fn corner_holds_max(grid: &[[u32; BOARD_SIZE]; BOARD_SIZE]) -> bool {
    let max = grid.iter().flatten().copied().max().unwrap_or(0);
    if max == 0 {
        return false;
    }
    let last = BOARD_SIZE - 1;
    [(0, 0), (0, last), (last, 0), (last, last)]
        .iter()
        .any(|&(row, col)| grid[row][col] == max)
}

/// Sum of absolute log2 differences over adjacent non-empty tile pairs.
/// Empty cells never enter a pair, so the term stays finite on any board.
fn smoothness(grid: &[[u32; BOARD_SIZE]; BOARD_SIZE]) -> f64 {
    let mut total = 0.0;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let value = grid[row][col];
            if value == 0 {
                continue;
            }
            let rank = f64::from(value).log2();
            if col + 1 < BOARD_SIZE && grid[row][col + 1] != 0 {
                total += (rank - f64::from(grid[row][col + 1]).log2()).abs();
            }
            if row + 1 < BOARD_SIZE && grid[row + 1][col] != 0 {
                total += (rank - f64::from(grid[row + 1][col]).log2()).abs();
            }
        }
    }
    total
}
