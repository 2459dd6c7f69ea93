// Library exports for the 2048 expectimax agent
// This allows the integration tests and the runner binary to use the core logic

pub mod bot;
pub mod config;
pub mod game;
pub mod heuristic;
pub mod search;
pub mod stats;
pub mod types;
