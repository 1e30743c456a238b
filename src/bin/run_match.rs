//! Play the anytime agent against a sample opponent and report its win rate.

use std::time::Duration;

use clap::Parser;
use isolation::{run_match, AgentConfig, Heuristic, MatchConfig, PlayerKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "run_match",
    version,
    about = "Pit the anytime alpha-beta agent against a sample opponent"
)]
struct Cli {
    /// Opponent: random, greedy, minimax or alphabeta
    #[arg(short = 'o', long, default_value = "minimax")]
    opponent: PlayerKind,
    /// Rounds to play (two games each, sides swapped)
    #[arg(short = 'r', long, default_value_t = 5)]
    rounds: u32,
    /// Time limit per move in milliseconds
    #[arg(short = 't', long = "time-limit-ms", default_value_t = 150)]
    time_limit_ms: u64,
    /// Frontier heuristic used by the agent
    #[arg(long, default_value_t = Heuristic::default())]
    heuristic: Heuristic,
    /// Deepest iteration of the agent's search
    #[arg(long, default_value_t = 16)]
    max_depth: u8,
    /// Seed for every random choice in the match
    #[arg(long)]
    seed: Option<u64>,
    /// Start both games of a round from the same random opening
    #[arg(long)]
    fair: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let agent_config = AgentConfig::default()
        .with_max_depth(cli.max_depth)
        .with_heuristic(cli.heuristic);
    agent_config.validate()?;

    let mut config = MatchConfig::default()
        .with_rounds(cli.rounds)
        .with_time_limit(Duration::from_millis(cli.time_limit_ms))
        .with_fair(cli.fair);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let summary = run_match(PlayerKind::AlphaBeta(agent_config), cli.opponent, &config)?;

    println!(
        "agent ({}) vs {}: won {} of {} games ({:.1}%)",
        cli.heuristic,
        cli.opponent,
        summary.wins,
        summary.games,
        summary.win_rate() * 100.0
    );
    if summary.forfeits > 0 {
        println!("agent forfeited {} games", summary.forfeits);
    }
    Ok(())
}
