//! `isolation`: play one game of Isolation between two engines in the terminal.
//!
//! Run with:
//! `cargo run --release -- --rows 6 --columns 6 --depth 4`
//! `RUST_LOG=debug cargo run --release -- --p1-heuristic flee --random-p2`

use clap::Parser;
use tracing_subscriber::EnvFilter;

use isolation_engine::engines::engine_random::RandomEngine;
use isolation_engine::engines::engine_search::{EngineConfig, SearchAlgorithm, SearchEngine};
use isolation_engine::engines::engine_trait::Engine;
use isolation_engine::game_state::isolation_types::Player;
use isolation_engine::search::board_scoring::HeuristicKind;
use isolation_engine::utils::engine_match_harness::{
    build_match_board, play_engine_match_observed, MatchConfig,
};
use isolation_engine::utils::render_board::render_board;

#[derive(Debug, Parser)]
#[command(name = "isolation", about = "Play a game of Isolation between two engines")]
struct Cli {
    #[arg(long, default_value_t = 5)]
    rows: usize,

    #[arg(long, default_value_t = 5)]
    columns: usize,

    /// Search depth for both sides unless overridden.
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// centrality, mobility, flee, or chase.
    #[arg(long, default_value_t = HeuristicKind::Mobility)]
    heuristic: HeuristicKind,

    /// negamax, alphabeta, or pessimism.
    #[arg(long, default_value_t = SearchAlgorithm::PessimismAware)]
    algorithm: SearchAlgorithm,

    #[arg(long)]
    p1_depth: Option<u32>,
    #[arg(long)]
    p2_depth: Option<u32>,
    #[arg(long)]
    p1_heuristic: Option<HeuristicKind>,
    #[arg(long)]
    p2_heuristic: Option<HeuristicKind>,
    #[arg(long)]
    p1_algorithm: Option<SearchAlgorithm>,
    #[arg(long)]
    p2_algorithm: Option<SearchAlgorithm>,

    /// Player one picks uniformly random legal moves.
    #[arg(long)]
    random_p1: bool,
    /// Player two picks uniformly random legal moves.
    #[arg(long)]
    random_p2: bool,

    /// Seed for walls and random players; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Least number of random walls placed before play.
    #[arg(long)]
    blocked_min: Option<usize>,
    /// Most random walls placed before play.
    #[arg(long)]
    blocked_max: Option<usize>,

    /// Print engine info lines and the board after every ply.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn blocked(&self) -> Option<(usize, usize)> {
        match (self.blocked_min, self.blocked_max) {
            (None, None) => None,
            (min, max) => {
                let min = min.unwrap_or(0);
                Some((min, max.unwrap_or(min)))
            }
        }
    }

    fn engine_for(&self, player: Player, seed: u64) -> Box<dyn Engine> {
        let (random, depth, heuristic, algorithm) = match player {
            Player::One => (
                self.random_p1,
                self.p1_depth,
                self.p1_heuristic,
                self.p1_algorithm,
            ),
            Player::Two => (
                self.random_p2,
                self.p2_depth,
                self.p2_heuristic,
                self.p2_algorithm,
            ),
        };

        if random {
            return Box::new(RandomEngine::with_seed(
                seed.wrapping_add(player.number() as u64),
            ));
        }

        Box::new(SearchEngine::new(EngineConfig {
            depth: depth.unwrap_or(self.depth),
            heuristic: heuristic.unwrap_or(self.heuristic),
            algorithm: algorithm.unwrap_or(self.algorithm),
        }))
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random::<u64>);

    let config = MatchConfig {
        rows: cli.rows,
        columns: cli.columns,
        blocked: cli.blocked(),
        seed,
        // Every ply blocks a cell, so a game never outlasts the board.
        max_plies: u32::try_from(cli.rows.saturating_mul(cli.columns)).unwrap_or(u32::MAX),
        ..MatchConfig::default()
    };
    let board = build_match_board(&config)?;
    let mut player1 = cli.engine_for(Player::One, seed);
    let mut player2 = cli.engine_for(Player::Two, seed);

    println!(
        "isolation {}x{} seed={} walls={} player1={} player2={}",
        board.rows(),
        board.columns(),
        seed,
        board.walls().len(),
        player1.name(),
        player2.name()
    );
    println!("{}\n", render_board(&board));

    let result = play_engine_match_observed(&mut player1, &mut player2, board, &config, |ply| {
        match ply.score {
            Some(score) => println!(
                "Best move player {}: {} score: {} time: {:.3}s",
                ply.player.number(),
                ply.mv,
                score,
                ply.elapsed.as_secs_f64()
            ),
            None => println!("Move player {}: {}", ply.player.number(), ply.mv),
        }
        if cli.verbose {
            for line in ply.info_lines {
                println!("{line}");
            }
            println!("{}\n", render_board(ply.board));
        }
    })?;

    if !cli.verbose {
        println!("\n{}", render_board(&result.final_board));
    }
    let winner = result.winner.ok_or("game ended without a winner")?;
    println!("Player {} wins!", winner.number());
    println!("{} plies={}", result.record.label(), result.record.len());

    Ok(())
}
