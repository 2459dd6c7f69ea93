// Configuration module for reading Agent.toml
// All tunable parameters of the agent live here: the per-move time budget and
// the evaluator weights

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::game::BOARD_SIZE;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub heuristic: HeuristicConfig,
}

/// Timing constants for the per-move search budget
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub move_time_budget_ms: u64,
    pub safety_margin_ms: u64,
    pub initial_depth: u32,
}

impl TimingConfig {
    /// Computes the effective computation budget: the wall-clock allowance
    /// minus the margin reserved for committing the answer
    pub fn effective_budget_ms(&self) -> u64 {
        self.move_time_budget_ms.saturating_sub(self.safety_margin_ms)
    }
}

/// Evaluator weights for static board scoring
#[derive(Debug, Deserialize, Clone)]
pub struct HeuristicConfig {
    /// Per-cell multipliers laid out row-major, rewarding a snake-shaped
    /// descent from the top-left corner
    pub position_weights: [[f64; BOARD_SIZE]; BOARD_SIZE],
    pub empty_weight: f64,
    pub monotonicity_weight: f64,
    pub corner_bonus: f64,
    pub smoothness_weight: f64,
    pub score_weight: f64,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Agent.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Agent.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Agent.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Agent.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                move_time_budget_ms: 100,
                safety_margin_ms: 5,
                initial_depth: 1,
            },
            heuristic: HeuristicConfig {
                position_weights: [
                    [65536.0, 32768.0, 16384.0, 8192.0],
                    [512.0, 1024.0, 2048.0, 4096.0],
                    [256.0, 128.0, 64.0, 32.0],
                    [1.0, 2.0, 4.0, 8.0],
                ],
                empty_weight: 5000.0,
                monotonicity_weight: 20000.0,
                corner_bonus: 15000.0,
                smoothness_weight: 128.0,
                score_weight: 1.0,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default()
            .unwrap_or_else(|e| {
                eprintln!("Warning: Could not load Agent.toml ({}), using hardcoded defaults", e);
                Self::default_hardcoded()
            })
    }
}
