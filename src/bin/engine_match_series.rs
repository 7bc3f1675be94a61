//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --games 20 --p2-heuristic chase --verbose`

use clap::Parser;
use tracing_subscriber::EnvFilter;

use isolation_engine::engines::engine_search::{EngineConfig, SearchAlgorithm, SearchEngine};
use isolation_engine::engines::engine_trait::Engine;
use isolation_engine::search::board_scoring::HeuristicKind;
use isolation_engine::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

#[derive(Debug, Parser)]
#[command(
    name = "engine_match_series",
    about = "Pit two search configurations against each other"
)]
struct Cli {
    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    #[arg(long, default_value_t = 5)]
    rows: usize,

    #[arg(long, default_value_t = 5)]
    columns: usize,

    #[arg(long)]
    blocked_min: Option<usize>,
    #[arg(long)]
    blocked_max: Option<usize>,

    #[arg(long, default_value_t = 4)]
    p1_depth: u32,
    #[arg(long, default_value_t = HeuristicKind::Mobility)]
    p1_heuristic: HeuristicKind,
    #[arg(long, default_value_t = SearchAlgorithm::PessimismAware)]
    p1_algorithm: SearchAlgorithm,

    #[arg(long, default_value_t = 4)]
    p2_depth: u32,
    #[arg(long, default_value_t = HeuristicKind::Centrality)]
    p2_heuristic: HeuristicKind,
    #[arg(long, default_value_t = SearchAlgorithm::PessimismAware)]
    p2_algorithm: SearchAlgorithm,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let player1_config = EngineConfig {
        depth: cli.p1_depth,
        heuristic: cli.p1_heuristic,
        algorithm: cli.p1_algorithm,
    };
    let player2_config = EngineConfig {
        depth: cli.p2_depth,
        heuristic: cli.p2_heuristic,
        algorithm: cli.p2_algorithm,
    };
    let player1 = || Box::new(SearchEngine::new(player1_config)) as Box<dyn Engine>;
    let player2 = || Box::new(SearchEngine::new(player2_config)) as Box<dyn Engine>;

    let blocked = match (cli.blocked_min, cli.blocked_max) {
        (None, None) => None,
        (min, max) => {
            let min = min.unwrap_or(0);
            Some((min, max.unwrap_or(min)))
        }
    };

    let stats = play_engine_match_series(
        player1,
        player2,
        MatchSeriesConfig {
            games: cli.games,
            base_seed: cli.seed,
            per_game: MatchConfig {
                rows: cli.rows,
                columns: cli.columns,
                blocked,
                ..MatchConfig::default()
            },
            verbose: cli.verbose,
        },
    )?;

    println!("player1: {:?}", player1_config);
    println!("player2: {:?}", player2_config);
    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
