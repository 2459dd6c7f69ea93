use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

use expectimax_2048::bot::Bot;
use expectimax_2048::config::Config;
use expectimax_2048::game::Game2048;
use expectimax_2048::types::GameState;

/// Command line options for the turn-loop runner
#[derive(Parser, Debug)]
#[command(name = "expectimax-2048")]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 1)]
    games: u32,

    /// Path to the configuration file (Agent.toml with fallback when omitted)
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Override the per-move time budget in milliseconds
    #[arg(long)]
    budget_ms: Option<u64>,

    /// Seed for the spawn RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final statistics as a JSON line on stdout
    #[arg(long, default_value_t = false)]
    json_summary: bool,
}

struct GameOutcome {
    score: u32,
    highest_tile: u32,
    moves: u32,
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment
    // variable is set, we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => Config::load_or_default(),
    };
    if let Some(budget_ms) = args.budget_ms {
        config.timing.move_time_budget_ms = budget_ms;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "Starting 2048 agent: {} game(s), {}ms per move, seed {}",
        args.games, config.timing.move_time_budget_ms, seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut bot = Bot::new(config);

    for game in 1..=args.games {
        let outcome = play_game(&mut bot, &mut rng);
        info!(
            "Game {}: score {}, highest tile {}, {} moves",
            game, outcome.score, outcome.highest_tile, outcome.moves
        );
    }

    let summary = bot.stats().summary();
    info!("Average depth: {:.2}", summary.average_depth);
    info!("Branching factor: {:.2}", summary.branching_factor);
    if args.json_summary {
        match serde_json::to_string(&summary) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        }
    }
}

/// Plays one game to completion: the agent decides, the environment spawns
fn play_game(bot: &mut Bot, rng: &mut StdRng) -> GameOutcome {
    let mut state = Game2048::new().spawn_random(rng).spawn_random(rng);
    let mut moves = 0;
    debug!("Opening position:\n{}", state);

    while let Some(mv) = bot.find_move(&state) {
        state = state.apply_move(mv).spawn_random(rng);
        moves += 1;
        debug!("Move {} ({}):\n{}", moves, mv, state);
    }

    GameOutcome {
        score: state.score(),
        highest_tile: state.max_tile(),
        moves,
    }
}
